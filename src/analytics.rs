use log::info;

/// A fire-and-forget analytics hit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsEvent {
    PageView { page: String },
    Event { action: String },
}

/// Receives analytics hits. Delivery has no response contract.
pub trait AnalyticsSink {
    fn send(&mut self, event: AnalyticsEvent);
}

/// Emits hits as `log` records under the `analytics` target
pub struct LogSink {
    measurement_id: Option<String>,
}

impl LogSink {
    pub fn new(measurement_id: Option<String>) -> Self {
        LogSink { measurement_id }
    }
}

impl AnalyticsSink for LogSink {
    fn send(&mut self, event: AnalyticsEvent) {
        let id = self.measurement_id.as_deref().unwrap_or("-");
        match event {
            AnalyticsEvent::PageView { page } => {
                info!(target: "analytics", "[{}] pageview page={}", id, page)
            }
            AnalyticsEvent::Event { action } => {
                info!(target: "analytics", "[{}] event action={}", id, action)
            }
        }
    }
}

#[cfg(test)]
pub mod testing {
    use super::{AnalyticsEvent, AnalyticsSink};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Keeps every hit in a shared list for inspection
    #[derive(Clone, Default)]
    pub struct RecordingSink {
        pub events: Rc<RefCell<Vec<AnalyticsEvent>>>,
    }

    impl AnalyticsSink for RecordingSink {
        fn send(&mut self, event: AnalyticsEvent) {
            self.events.borrow_mut().push(event);
        }
    }
}
