use crate::{
    error::ValidationError,
    input::{DropZone, FileSelection},
    models::ResultSet,
};

/// Busy indicator and error banner.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Status {
    pub loading: bool,
    pub error: Option<String>,
}

/// Developer-facing diagnostics, filled by the startup health check.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DebugPanel {
    pub visible: bool,
    pub lines: Vec<String>,
}

/// All mutable client state. Owned by [`crate::app::App`] and only touched from
/// its dispatch loop.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    pub results: Option<ResultSet>,
    pub threshold: f64,
    pub selection: Option<FileSelection>,
    pub drop_zone: DropZone,
    pub status: Status,
    pub debug: DebugPanel,
}

impl AppState {
    pub fn new(threshold: f64, debug: bool) -> Self {
        Self {
            threshold,
            debug: DebugPanel {
                visible: debug,
                lines: Vec::new(),
            },
            ..Default::default()
        }
    }

    pub fn set_results(&mut self, results: ResultSet) {
        self.results = Some(results);
    }

    pub fn set_threshold(&mut self, threshold: f64) -> Result<(), ValidationError> {
        if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
            return Err(ValidationError::InvalidThreshold(threshold));
        }
        self.threshold = threshold;
        Ok(())
    }

    pub fn show_error(&mut self, message: impl Into<String>) {
        self.status.error = Some(message.into());
    }

    pub fn hide_error(&mut self) {
        self.status.error = None;
    }

    pub fn show_loading(&mut self) {
        self.status.loading = true;
    }

    pub fn hide_loading(&mut self) {
        self.status.loading = false;
    }

    /// Both submit triggers are disabled while a request is in flight.
    pub fn triggers_enabled(&self) -> bool {
        !self.status.loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Product;

    #[test]
    fn test_set_results_replaces() {
        let mut state = AppState::default();
        state.set_results(ResultSet {
            products: vec![Product::default(), Product::default()],
            ..Default::default()
        });
        state.set_results(ResultSet {
            products: vec![Product::default()],
            ..Default::default()
        });
        assert_eq!(state.results.unwrap().products.len(), 1);
    }

    #[test]
    fn test_set_threshold_bounds() {
        let mut state = AppState::new(0.5, false);
        assert!(state.set_threshold(1.0).is_ok());
        assert!(state.set_threshold(0.0).is_ok());
        assert_eq!(
            state.set_threshold(1.5),
            Err(ValidationError::InvalidThreshold(1.5))
        );
        assert!(state.set_threshold(f64::NAN).is_err());
        assert_eq!(state.threshold, 0.0);
    }

    #[test]
    fn test_error_last_write_wins() {
        let mut state = AppState::default();
        state.show_error("first");
        state.show_error("second");
        assert_eq!(state.status.error.as_deref(), Some("second"));
        state.hide_error();
        assert_eq!(state.status.error, None);
    }

    #[test]
    fn test_loading_disables_triggers() {
        let mut state = AppState::default();
        state.show_loading();
        assert!(!state.triggers_enabled());
        state.hide_loading();
        assert!(state.triggers_enabled());
    }
}
