//! Panel orientation and the geometry that goes with it

use crate::tftlcd::flag::Flag;
use crate::tftlcd::{HEIGHT, WIDTH};

/// Logical panel size for one orientation
///
/// Only obtainable from an [`Orientation`], so both sides always fit the row buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    width: u16,
    height: u16,
}

impl Geometry {
    const LANDSCAPE: Geometry = Geometry {
        width: WIDTH,
        height: HEIGHT,
    };
    const PORTRAIT: Geometry = Geometry {
        width: HEIGHT,
        height: WIDTH,
    };

    /// Width in pixels
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Height in pixels
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Last valid column
    pub const fn last_column(&self) -> u16 {
        self.width - 1
    }

    /// Last valid row
    pub const fn last_row(&self) -> u16 {
        self.height - 1
    }
}

/// Display orientation, named after where the driver IC ends up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    LandscapeUp,
    LandscapeDown,
    PortraitUp,
    PortraitDown,
}

/// Landscape or portrait, the only thing fill geometry cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    Landscape,
    Portrait,
}

impl Orientation {
    /// Memory access control value that selects this orientation
    pub const fn register(self) -> u8 {
        match self {
            Orientation::LandscapeUp => Flag::MADCTL_LANDSCAPE_UP,
            Orientation::LandscapeDown => Flag::MADCTL_LANDSCAPE_DOWN,
            Orientation::PortraitUp => Flag::MADCTL_PORTRAIT_UP,
            Orientation::PortraitDown => Flag::MADCTL_PORTRAIT_DOWN,
        }
    }

    pub const fn family(self) -> Family {
        match self {
            Orientation::LandscapeUp | Orientation::LandscapeDown => Family::Landscape,
            Orientation::PortraitUp | Orientation::PortraitDown => Family::Portrait,
        }
    }

    /// Panel size as seen in this orientation
    pub const fn geometry(self) -> Geometry {
        match self.family() {
            Family::Landscape => Geometry::LANDSCAPE,
            Family::Portrait => Geometry::PORTRAIT,
        }
    }

    /// The orientation that follows this one in the rotation cycle
    pub const fn next(self) -> Orientation {
        match self {
            Orientation::LandscapeUp => Orientation::LandscapeDown,
            Orientation::LandscapeDown => Orientation::PortraitUp,
            Orientation::PortraitUp => Orientation::PortraitDown,
            Orientation::PortraitDown => Orientation::LandscapeUp,
        }
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Orientation::LandscapeUp => write!(f, "landscape, IC up"),
            Orientation::LandscapeDown => write!(f, "landscape, IC down"),
            Orientation::PortraitUp => write!(f, "portrait, IC up"),
            Orientation::PortraitDown => write!(f, "portrait, IC down"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tftlcd::ROW_CAPACITY;

    #[test]
    fn cycle_visits_all_four_and_returns() {
        let start = Orientation::LandscapeUp;
        let seen: Vec<Orientation> = std::iter::successors(Some(start), |o| Some(o.next()))
            .take(5)
            .collect();
        assert_eq!(
            seen,
            vec![
                Orientation::LandscapeUp,
                Orientation::LandscapeDown,
                Orientation::PortraitUp,
                Orientation::PortraitDown,
                Orientation::LandscapeUp,
            ]
        );
    }

    #[test]
    fn register_values() {
        assert_eq!(Orientation::LandscapeUp.register(), 0xA0);
        assert_eq!(Orientation::LandscapeDown.register(), 0x20);
        assert_eq!(Orientation::PortraitUp.register(), 0xC0);
        assert_eq!(Orientation::PortraitDown.register(), 0x00);
    }

    #[test]
    fn geometry_follows_family() {
        for o in [Orientation::LandscapeUp, Orientation::LandscapeDown] {
            assert_eq!(o.family(), Family::Landscape);
            assert_eq!((o.geometry().width(), o.geometry().height()), (320, 240));
        }
        for o in [Orientation::PortraitUp, Orientation::PortraitDown] {
            assert_eq!(o.family(), Family::Portrait);
            assert_eq!((o.geometry().width(), o.geometry().height()), (240, 320));
        }
    }

    #[test]
    fn every_geometry_fits_the_row_buffer() {
        let mut o = Orientation::default();
        for _ in 0..4 {
            assert!(o.geometry().width() as usize <= ROW_CAPACITY);
            o = o.next();
        }
    }
}
