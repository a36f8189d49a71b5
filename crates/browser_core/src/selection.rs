use shared::domain::UserId;

/// At most one record is expanded at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    Collapsed,
    Expanded(UserId),
}

impl Selection {
    pub fn toggle(&mut self, id: &UserId) {
        *self = match self {
            Self::Expanded(current) if current == id => Self::Collapsed,
            _ => Self::Expanded(id.clone()),
        };
    }

    pub fn is_expanded(&self, id: &UserId) -> bool {
        matches!(self, Self::Expanded(current) if current == id)
    }

    pub fn expanded(&self) -> Option<&UserId> {
        match self {
            Self::Expanded(id) => Some(id),
            Self::Collapsed => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_collapsed() {
        assert_eq!(Selection::default(), Selection::Collapsed);
        assert_eq!(Selection::default().expanded(), None);
    }

    #[test]
    fn clicking_same_record_twice_collapses() {
        let x = UserId::new("x");
        let mut selection = Selection::default();
        selection.toggle(&x);
        assert!(selection.is_expanded(&x));
        selection.toggle(&x);
        assert_eq!(selection, Selection::Collapsed);
    }

    #[test]
    fn clicking_other_record_moves_expansion() {
        let x = UserId::new("x");
        let y = UserId::new("y");
        let mut selection = Selection::default();
        selection.toggle(&x);
        selection.toggle(&y);
        assert_eq!(selection, Selection::Expanded(y.clone()));
        assert!(!selection.is_expanded(&x));
        assert!(selection.is_expanded(&y));
    }
}
