#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use dispatch_core::ecs::OrderId;
use dispatch_core::notify::{MatchNotice, NotificationSink};

/// Sink that records every notice it receives, shared with the test body.
pub struct RecordingSink {
    notices: Arc<Mutex<Vec<OrderId>>>,
}

impl RecordingSink {
    pub fn new() -> (Self, Arc<Mutex<Vec<OrderId>>>) {
        let log = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                notices: log.clone(),
            },
            log,
        )
    }
}

impl NotificationSink for RecordingSink {
    fn on_matched(&mut self, notice: &MatchNotice) {
        self.notices.lock().expect("sink lock").push(notice.order);
    }
}
