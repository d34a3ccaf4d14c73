/// Visibility of the dialog overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Open,
    Closed,
}

impl ModalState {
    pub fn from_open(open: bool) -> Self {
        if open {
            ModalState::Open
        } else {
            ModalState::Closed
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, ModalState::Open)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_open() {
        assert!(ModalState::default().is_open());
    }

    #[test]
    fn test_from_open() {
        assert_eq!(ModalState::from_open(true), ModalState::Open);
        assert_eq!(ModalState::from_open(false), ModalState::Closed);
    }
}
