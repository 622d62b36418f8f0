/// Busy/result/notification state for the upload -> inference -> report ->
/// export workflow. Every transition goes through a method here; the iced
/// update loop never touches the fields directly.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct Workflow {
    phase: Phase,
    report: Option<String>,
    error: Option<String>,
    notification: Option<Notification>,
    submission_seq: u64,
}

impl Workflow {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_busy(&self) -> bool {
        self.phase == Phase::Submitting
    }

    pub fn report(&self) -> Option<&str> {
        self.report.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    /// Starts a new submission, discarding the previous report or error
    /// immediately rather than on response arrival. Returns the sequence
    /// number that the eventual resolution must present, or `None` while a
    /// submission is already in flight.
    pub fn begin_submission(&mut self) -> Option<u64> {
        if self.is_busy() {
            return None;
        }
        self.report = None;
        self.error = None;
        self.phase = Phase::Submitting;
        self.submission_seq += 1;
        Some(self.submission_seq)
    }

    /// Applies the outcome of the submission tagged `seq`. A resolution
    /// carrying a stale sequence number (the submission was superseded) is
    /// discarded and `false` is returned.
    pub fn resolve(&mut self, seq: u64, outcome: Result<String, String>) -> bool {
        if seq != self.submission_seq || self.phase != Phase::Submitting {
            return false;
        }
        match outcome {
            Ok(report) => {
                self.report = Some(report);
                self.phase = Phase::Succeeded;
                self.notify("Success", "Report generated successfully!");
            }
            Err(message) => {
                self.error = Some(message.clone());
                self.phase = Phase::Failed;
                self.notify("Report Generation Failed", message);
            }
        }
        true
    }

    pub fn can_export(&self) -> bool {
        self.phase == Phase::Succeeded && self.report.is_some()
    }

    /// Clears the inline error when the user starts a fresh attempt by
    /// picking a new image.
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Shows a notification, replacing whatever is currently displayed.
    pub fn notify(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.notification = Some(Notification {
            title: title.into(),
            message: message.into(),
        });
    }

    pub fn dismiss(&mut self) {
        self.notification = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submission_success_stores_report() {
        let mut workflow = Workflow::default();
        assert_eq!(workflow.phase(), Phase::Idle);

        let seq = workflow.begin_submission().unwrap();
        assert!(workflow.is_busy());
        assert!(workflow.report().is_none());
        assert!(workflow.error().is_none());

        assert!(workflow.resolve(seq, Ok("Clear lungs.".to_string())));
        assert_eq!(workflow.phase(), Phase::Succeeded);
        assert_eq!(workflow.report(), Some("Clear lungs."));
        assert!(workflow.error().is_none());
        assert!(workflow.can_export());
        assert_eq!(workflow.notification().unwrap().title, "Success");
    }

    #[test]
    fn submission_failure_stores_error() {
        let mut workflow = Workflow::default();
        let seq = workflow.begin_submission().unwrap();

        assert!(workflow.resolve(seq, Err("HTTP 500: boom".to_string())));
        assert_eq!(workflow.phase(), Phase::Failed);
        assert!(workflow.report().is_none());
        assert_eq!(workflow.error(), Some("HTTP 500: boom"));
        assert!(!workflow.can_export());
        let notification = workflow.notification().unwrap();
        assert_eq!(notification.title, "Report Generation Failed");
        assert!(notification.message.contains("500"));
        assert!(notification.message.contains("boom"));
    }

    #[test]
    fn busy_blocks_a_second_submission() {
        let mut workflow = Workflow::default();
        let seq = workflow.begin_submission().unwrap();
        assert!(workflow.begin_submission().is_none());
        assert!(workflow.resolve(seq, Ok(String::new())));
        assert!(workflow.begin_submission().is_some());
    }

    #[test]
    fn resubmission_discards_previous_result_immediately() {
        let mut workflow = Workflow::default();
        let seq = workflow.begin_submission().unwrap();
        workflow.resolve(seq, Ok("first".to_string()));

        workflow.begin_submission().unwrap();
        assert!(workflow.report().is_none());
        assert!(workflow.error().is_none());
        assert!(workflow.is_busy());
    }

    #[test]
    fn stale_resolution_is_discarded() {
        let mut workflow = Workflow::default();
        let first = workflow.begin_submission().unwrap();
        workflow.resolve(first, Err("timed out".to_string()));

        let second = workflow.begin_submission().unwrap();
        assert!(!workflow.resolve(first, Ok("late answer".to_string())));
        assert!(workflow.is_busy());
        assert!(workflow.report().is_none());

        assert!(workflow.resolve(second, Ok("fresh answer".to_string())));
        assert_eq!(workflow.report(), Some("fresh answer"));
    }

    #[test]
    fn duplicate_resolution_is_discarded() {
        let mut workflow = Workflow::default();
        let seq = workflow.begin_submission().unwrap();
        assert!(workflow.resolve(seq, Ok("once".to_string())));
        assert!(!workflow.resolve(seq, Ok("twice".to_string())));
        assert_eq!(workflow.report(), Some("once"));
    }

    #[test]
    fn export_gated_on_successful_report() {
        let mut workflow = Workflow::default();
        assert!(!workflow.can_export());

        let seq = workflow.begin_submission().unwrap();
        assert!(!workflow.can_export());
        workflow.resolve(seq, Err("no".to_string()));
        assert!(!workflow.can_export());

        let seq = workflow.begin_submission().unwrap();
        workflow.resolve(seq, Ok("report".to_string()));
        assert!(workflow.can_export());
    }

    #[test]
    fn notification_replaces_and_dismisses() {
        let mut workflow = Workflow::default();
        workflow.notify("First", "one");
        workflow.notify("Second", "two");
        assert_eq!(workflow.notification().unwrap().title, "Second");

        workflow.dismiss();
        assert!(workflow.notification().is_none());
    }

    #[test]
    fn clear_error_leaves_report_untouched() {
        let mut workflow = Workflow::default();
        let seq = workflow.begin_submission().unwrap();
        workflow.resolve(seq, Err("bad file".to_string()));

        workflow.clear_error();
        assert!(workflow.error().is_none());
        assert_eq!(workflow.phase(), Phase::Failed);
    }
}
