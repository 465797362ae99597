pub mod roster;
pub mod shortlist;
