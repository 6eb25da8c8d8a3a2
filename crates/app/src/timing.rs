//! Timers for transient UI state: notices that dismiss themselves and the
//! upload bar that drops back to zero, both guarded by [`Expiring`].

/// Wait `ms` milliseconds without blocking the UI thread.
pub async fn sleep_ms(ms: u64) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(std::time::Duration::from_millis(ms)).await;

    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
}

/// A value shown until a timer clears it. Every [`set`](Self::set) starts a
/// new generation, and a timer only clears the generation it was started
/// for, so a newer value outlives an older countdown.
#[derive(Debug, Clone, PartialEq)]
pub struct Expiring<T> {
    value: Option<T>,
    generation: u64,
}

impl<T> Default for Expiring<T> {
    fn default() -> Self {
        Self {
            value: None,
            generation: 0,
        }
    }
}

impl<T> Expiring<T> {
    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Replace the value and return the generation a timer should clear.
    pub fn set(&mut self, value: T) -> u64 {
        self.generation += 1;
        self.value = Some(value);
        self.generation
    }

    pub fn clear(&mut self) {
        self.value = None;
    }

    /// True while nothing has been set since `generation`.
    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Clear the value if it still belongs to `generation`.
    pub fn expire(&mut self, generation: u64) -> bool {
        let current = self.is_current(generation);
        if current {
            self.clear();
        }
        current
    }
}
