use sv_core::ports::ServiceError;
use sv_core::read_state::{unread_count, ReadState};

/// Items of a feed plus its loading status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedState<T> {
    pub items: Vec<T>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl<T> Default for FeedState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            is_loading: false,
            error: None,
        }
    }
}

impl<T: ReadState> FeedState<T> {
    pub fn begin_load(&mut self) {
        self.is_loading = true;
        self.error = None;
    }

    /// Apply a fetch result. A failure keeps the previous items.
    pub fn finish_load(&mut self, result: Result<Vec<T>, ServiceError>, fallback: &str) {
        self.is_loading = false;
        match result {
            Ok(items) => self.items = items,
            Err(err) => {
                let message = err.to_string();
                self.error = Some(if message.is_empty() {
                    fallback.to_string()
                } else {
                    message
                });
            }
        }
    }

    pub fn unread_count(&self) -> usize {
        unread_count(&self.items)
    }

    /// Mark the items whose id is in `ids`; returns how many changed.
    pub fn mark_read(&mut self, ids: &[T::Id]) -> usize {
        let mut changed = 0;
        for item in self.items.iter_mut().filter(|item| ids.contains(item.id())) {
            if !item.is_read() {
                item.mark_read();
                changed += 1;
            }
        }
        changed
    }

    pub fn mark_all_read(&mut self) -> usize {
        let mut changed = 0;
        for item in self.items.iter_mut().filter(|item| !item.is_read()) {
            item.mark_read();
            changed += 1;
        }
        changed
    }
}
