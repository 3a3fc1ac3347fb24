/// A single modal slot. Showing a modal replaces whatever was open.
#[derive(Debug)]
pub struct ModalSlot<T> {
    current: Option<Modal<T>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Modal<T> {
    pub title: String,
    pub body: T,
}

impl<T> Default for ModalSlot<T> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<T> ModalSlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, title: impl Into<String>, body: T) {
        let title = title.into();
        if let Some(previous) = &self.current {
            tracing::debug!(replaced = %previous.title, title = %title, "replacing open modal");
        }
        self.current = Some(Modal { title, body });
    }

    /// Closing an empty slot is a no-op.
    pub fn close(&mut self) -> Option<Modal<T>> {
        self.current.take()
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Option<&Modal<T>> {
        self.current.as_ref()
    }
}
