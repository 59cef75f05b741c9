/// Severity of a user-visible notice.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NoticeSeverity {
    Info,
    Warning,
    Error,
}

/// A dismissible, user-facing notice.
///
/// `kind` is a stable key usable for localization lookup; `message` is the
/// default rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: NoticeSeverity,
    pub kind: &'static str,
    pub message: String,
}

/// Ordered queue of user-visible notices.
///
/// Failures in the map core never throw into the render path; they land here
/// and the embedder drains and displays them.
#[derive(Debug, Default)]
pub struct NoticeBus {
    notices: Vec<Notice>,
}

impl NoticeBus {
    pub fn new() -> Self {
        Self {
            notices: Vec::new(),
        }
    }

    pub fn emit(&mut self, severity: NoticeSeverity, kind: &'static str, message: impl Into<String>) {
        self.notices.push(Notice {
            severity,
            kind,
            message: message.into(),
        });
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn drain(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}

#[cfg(test)]
mod tests {
    use super::{NoticeBus, NoticeSeverity};

    #[test]
    fn records_notices_in_order() {
        let mut bus = NoticeBus::new();
        bus.emit(NoticeSeverity::Warning, "route_failed", "could not load route");
        bus.emit(NoticeSeverity::Error, "location_denied", "location permission denied");
        assert_eq!(bus.notices().len(), 2);
        assert_eq!(bus.notices()[0].kind, "route_failed");
    }

    #[test]
    fn drain_clears_notices() {
        let mut bus = NoticeBus::new();
        bus.emit(NoticeSeverity::Info, "k", "m");
        let drained = bus.drain();
        assert_eq!(drained.len(), 1);
        assert!(bus.notices().is_empty());
    }
}
