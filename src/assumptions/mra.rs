//! Minimum retirement age (MRA) by birth year
//!
//! The MRA is a step function of birth year. Bands are held in order and the first
//! band whose `born_before` bound exceeds the birth year wins.

/// One MRA band: everyone born before `born_before` (and after the previous band) gets `mra`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MraBand {
    pub born_before: i32,
    pub mra: u32,
}

#[derive(Debug, Clone)]
pub struct MraTable {
    bands: Vec<MraBand>,
    /// MRA for birth years past the last band
    fallback: u32,
}

impl Default for MraTable {
    fn default() -> Self {
        // The statutory 2-month steps between 1948 and 1969 are collapsed to whole years
        Self {
            bands: vec![
                MraBand { born_before: 1948, mra: 55 },
                MraBand { born_before: 1950, mra: 55 },
                MraBand { born_before: 1953, mra: 56 },
                MraBand { born_before: 1965, mra: 56 },
                MraBand { born_before: 1970, mra: 57 },
            ],
            fallback: 57,
        }
    }
}

impl MraTable {
    /// Build from loaded bands; the last band's MRA also covers later birth years.
    /// Bands must already be sorted by `born_before`.
    pub fn from_bands(bands: Vec<MraBand>) -> Self {
        let fallback = bands.last().map(|b| b.mra).unwrap_or(57);
        Self { bands, fallback }
    }

    /// MRA for a given birth year
    pub fn lookup(&self, birth_year: i32) -> u32 {
        self.bands
            .iter()
            .find(|band| birth_year < band.born_before)
            .map(|band| band.mra)
            .unwrap_or(self.fallback)
    }

    pub fn bands(&self) -> &[MraBand] {
        &self.bands
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bands() {
        let table = MraTable::default();

        assert_eq!(table.lookup(1945), 55);
        assert_eq!(table.lookup(1949), 55);
        assert_eq!(table.lookup(1950), 56);
        assert_eq!(table.lookup(1955), 56);
        assert_eq!(table.lookup(1964), 56);
        assert_eq!(table.lookup(1965), 57);
        assert_eq!(table.lookup(1967), 57);
        assert_eq!(table.lookup(1985), 57);
    }

    #[test]
    fn test_extra_band_without_touching_callers() {
        let mut bands = MraTable::default().bands().to_vec();
        bands.push(MraBand { born_before: 1990, mra: 58 });
        let table = MraTable::from_bands(bands);

        assert_eq!(table.lookup(1967), 57);
        assert_eq!(table.lookup(1975), 58);
        assert_eq!(table.lookup(2000), 58);
    }
}
