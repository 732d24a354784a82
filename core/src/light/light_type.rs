//! Light Types

use bitflags::bitflags;

bitflags! {
    /// Stores combination of flags for the light types.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct LightType: u8 {
        const DELTA_POSITION_LIGHT = 1;
        const DELTA_DIRECTION_LIGHT = 2;
        const AREA_LIGHT = 4;
        const INFINITE_LIGHT = 8;
    }
}

impl LightType {
    /// Returns true if the light flags has the DELTA_POSITION_LIGHT or
    /// DELTA_DIRECTION_LIGHT flag set.
    pub fn is_delta_light(&self) -> bool {
        self.intersects(Self::DELTA_POSITION_LIGHT | Self::DELTA_DIRECTION_LIGHT)
    }

    /// Returns true if the light sits infinitely far away and surrounds the
    /// scene.
    pub fn is_infinite_light(&self) -> bool {
        self.contains(Self::INFINITE_LIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_lights() {
        assert!(LightType::DELTA_POSITION_LIGHT.is_delta_light());
        assert!(LightType::DELTA_DIRECTION_LIGHT.is_delta_light());
        assert!(!LightType::AREA_LIGHT.is_delta_light());
        assert!(LightType::INFINITE_LIGHT.is_infinite_light());
        assert!(!LightType::AREA_LIGHT.is_infinite_light());
    }
}
