use crate::consts;
use enum_map::Enum;
use ratatui::layout::{Flex, Layout, Rect, Size};

pub(crate) fn get_display_area(buffer_area: Rect) -> Rect {
    let [display] = Layout::horizontal([consts::DISPLAY_SIZE.width])
        .flex(Flex::Center)
        .areas(buffer_area);
    let [display] = Layout::vertical([consts::DISPLAY_SIZE.height])
        .flex(Flex::Center)
        .areas(display);
    display
}

/// Return a `Rect` of size `size` centered within `area`, rounding up and to
/// the left when it can't be centered exactly.  If `size` doesn't fit in
/// `area`, it is clipped to `area`.
pub(crate) fn center_rect(area: Rect, size: Size) -> Rect {
    let width = size.width.min(area.width);
    let height = size.height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Navigation over the variants of a fieldless enum, in declaration order
pub(crate) trait EnumExt: Enum {
    fn iter() -> impl Iterator<Item = Self> {
        (0..Self::LENGTH).map(Self::from_usize)
    }

    fn min() -> Self {
        Self::from_usize(0)
    }

    fn max() -> Self {
        Self::from_usize(Self::LENGTH.saturating_sub(1))
    }

    fn next(self) -> Option<Self> {
        let i = self.into_usize() + 1;
        (i < Self::LENGTH).then(|| Self::from_usize(i))
    }

    fn prev(self) -> Option<Self> {
        self.into_usize().checked_sub(1).map(Self::from_usize)
    }
}

impl<T: Enum> EnumExt for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Rect::new(0, 0, 80, 24), Size::new(22, 12), Rect::new(29, 6, 22, 12))]
    #[case(Rect::new(0, 1, 80, 21), Size::new(22, 12), Rect::new(29, 5, 22, 12))]
    #[case(Rect::new(10, 10, 5, 5), Size::new(5, 5), Rect::new(10, 10, 5, 5))]
    #[case(Rect::new(10, 10, 4, 4), Size::new(9, 2), Rect::new(10, 11, 4, 2))]
    fn test_center_rect(#[case] area: Rect, #[case] size: Size, #[case] r: Rect) {
        assert_eq!(center_rect(area, size), r);
    }

    #[test]
    fn display_area_in_large_terminal() {
        assert_eq!(
            get_display_area(Rect::new(0, 0, 100, 30)),
            Rect::new(10, 3, 80, 24)
        );
    }

    #[derive(Clone, Copy, Debug, Enum, Eq, PartialEq)]
    enum Abc {
        A,
        B,
        C,
    }

    #[test]
    fn enum_navigation() {
        assert_eq!(Abc::iter().collect::<Vec<_>>(), [Abc::A, Abc::B, Abc::C]);
        assert_eq!(Abc::min(), Abc::A);
        assert_eq!(Abc::max(), Abc::C);
        assert_eq!(Abc::A.next(), Some(Abc::B));
        assert_eq!(Abc::C.next(), None);
        assert_eq!(Abc::B.prev(), Some(Abc::A));
        assert_eq!(Abc::A.prev(), None);
    }
}
