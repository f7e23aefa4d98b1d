use crossterm::event::{poll, Event, KeyEvent};
use tokio::time::Duration;

pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
        }
    }

    pub async fn next_event(&mut self) -> anyhow::Result<EventType> {
        // Check for terminal events without blocking first
        if poll(Duration::from_millis(0))? {
            return Ok(match crossterm::event::read()? {
                Event::Key(key) => EventType::Key(key),
                Event::Resize(w, h) => EventType::Resize(w, h),
                _ => EventType::Other,
            });
        }

        // If no immediate event, wait a bit and return tick
        tokio::time::sleep(self.tick_rate).await;
        Ok(EventType::Tick)
    }
}

#[derive(Debug, Clone)]
pub enum EventType {
    Key(KeyEvent),
    Resize(u16, u16),
    Tick,
    Other,
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new(100)
    }
}
