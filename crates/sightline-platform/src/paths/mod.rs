mod ensure;
mod resolve;

pub use ensure::ensure_dirs;
pub use resolve::{config_dir, crash_report_dir, data_dir, log_dir, placement_file, DataProfile};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_dir_ends_with_sightline() {
        let path = config_dir().unwrap();
        assert!(
            path.ends_with("sightline"),
            "config_dir should end with 'sightline', got: {path:?}"
        );
    }

    #[test]
    fn packaged_data_dir_ends_with_sightline() {
        let path = data_dir(DataProfile::Packaged).unwrap();
        assert!(
            path.ends_with("sightline"),
            "data_dir should end with 'sightline', got: {path:?}"
        );
    }

    #[test]
    fn development_data_dir_is_separate() {
        let dev = data_dir(DataProfile::Development).unwrap();
        let packaged = data_dir(DataProfile::Packaged).unwrap();
        assert_ne!(dev, packaged);
        assert_eq!(
            dev.file_name().unwrap().to_str().unwrap(),
            "sightline (development)"
        );
        assert_eq!(dev.parent(), packaged.parent());
    }

    #[test]
    fn placement_file_has_correct_name() {
        let path = placement_file(DataProfile::Packaged).unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "placement.json"
        );
        assert!(path.parent().unwrap().ends_with("sightline"));
    }

    #[test]
    fn crash_reports_live_under_log_dir() {
        let crash = crash_report_dir().unwrap();
        let log = log_dir().unwrap();
        assert!(crash.starts_with(&log));
        assert_eq!(log.file_name().unwrap().to_str().unwrap(), "logs");
    }
}
