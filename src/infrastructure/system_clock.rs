// Wall clock in the local time zone
use crate::application::page_view::Clock;
use chrono::{DateTime, Local};

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}
