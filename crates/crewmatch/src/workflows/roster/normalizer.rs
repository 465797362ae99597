use crate::workflows::shortlist::domain::{JobPriority, WorkerStatus};

/// Splits a multi-value cell on `;` or `|`, trimming entries and dropping blanks.
pub(crate) fn split_list(value: &str) -> Vec<String> {
    value
        .split([';', '|'])
        .map(clean_cell)
        .filter(|entry| !entry.is_empty())
        .collect()
}

pub(crate) fn clean_cell(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub(crate) fn parse_worker_status(value: &str) -> Option<WorkerStatus> {
    match clean_cell(value).to_lowercase().as_str() {
        "active" | "activo" | "activa" => Some(WorkerStatus::Active),
        "standby" | "en espera" | "reserva" => Some(WorkerStatus::Standby),
        "blocked" | "bloqueado" | "bloqueada" => Some(WorkerStatus::Blocked),
        _ => None,
    }
}

/// Unknown or empty priorities fall back to `Normal`.
pub(crate) fn parse_priority(value: &str) -> JobPriority {
    match clean_cell(value).to_lowercase().as_str() {
        "low" | "baja" => JobPriority::Low,
        "high" | "alta" => JobPriority::High,
        "urgent" | "urgente" => JobPriority::Urgent,
        _ => JobPriority::Normal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_list_accepts_both_separators() {
        assert_eq!(
            split_list(" Español ; Inglés|  Francés  ;;"),
            vec!["Español", "Inglés", "Francés"]
        );
        assert!(split_list("   ").is_empty());
    }

    #[test]
    fn worker_status_accepts_spanish_labels() {
        assert_eq!(parse_worker_status("Activo"), Some(WorkerStatus::Active));
        assert_eq!(parse_worker_status(" en  espera "), Some(WorkerStatus::Standby));
        assert_eq!(parse_worker_status("BLOQUEADO"), Some(WorkerStatus::Blocked));
        assert_eq!(parse_worker_status("retired"), None);
    }

    #[test]
    fn clean_cell_strips_invisible_characters() {
        assert_eq!(clean_cell("\u{feff}TUBERO\u{200b} "), "TUBERO");
    }
}
