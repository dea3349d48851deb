// src/common/clock.rs

use chrono::{DateTime, NaiveDate, Utc};

/// Fonte de "agora". O agendador calcula "amanhã" a partir daqui.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    // Dia civil em UTC
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

#[cfg(test)]
impl FixedClock {
    /// Meio-dia UTC do dia informado.
    pub fn on(day: NaiveDate) -> Self {
        Self(day.and_hms_opt(12, 0, 0).expect("meio-dia válido").and_utc())
    }
}

#[cfg(test)]
impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
