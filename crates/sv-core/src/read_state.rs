//! Shared read-flag behaviour for feed items.

/// Item with a read flag that can be cleared locally.
pub trait ReadState {
    type Id: PartialEq;

    fn id(&self) -> &Self::Id;
    fn is_read(&self) -> bool;
    fn mark_read(&mut self);
}

/// Number of unread items.
pub fn unread_count<T: ReadState>(items: &[T]) -> usize {
    items.iter().filter(|item| !item.is_read()).count()
}
