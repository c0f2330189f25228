//! Responsive tier selection.
//!
//! Maps a viewport width (CSS pixels) and a coarse device class to a grid
//! resolution. The mapping is total: every width, including nonsense values
//! from a half-initialised page, resolves to exactly one tier.

use crate::constants::*;

/// Resolution of the cell lattice for one tier.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridConfig {
    pub grid_size: u32,
    pub cell_size: f32,
    pub gap: f32,
}

impl GridConfig {
    pub const fn new(grid_size: u32, cell_size: f32, gap: f32) -> Self {
        Self {
            grid_size,
            cell_size,
            gap,
        }
    }

    const fn from_tuple(t: (u32, f32, f32)) -> Self {
        Self::new(t.0, t.1, t.2)
    }

    /// Distance between neighbouring cell centres.
    #[inline]
    pub fn spacing(&self) -> f32 {
        self.cell_size + self.gap
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        (self.grid_size as usize) * (self.grid_size as usize)
    }

    /// Half the side length of the lattice, measured between outermost centres.
    pub fn half_extent(&self) -> f32 {
        (self.grid_size.saturating_sub(1)) as f32 * self.spacing() * 0.5
    }

    pub(crate) fn is_valid(&self) -> bool {
        self.grid_size > 0 && self.cell_size > 0.0 && self.cell_size.is_finite()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DeviceClass {
    #[default]
    Standard,
    /// Phones and other weak GPUs. Never goes above the desktop tier.
    LowPower,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tier {
    pub name: &'static str,
    /// Exclusive upper bound in CSS pixels; `None` catches all larger widths.
    pub max_width: Option<f32>,
    pub config: GridConfig,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TierTable {
    pub tiers: Vec<Tier>,
    /// Used for zero, negative or non-finite widths.
    pub default_index: usize,
    /// Highest tier index a [`DeviceClass::LowPower`] device may select.
    pub low_power_cap: usize,
}

impl TierTable {
    /// Mobile / desktop / large / ultrawide breakpoints shared by every scene.
    pub fn standard() -> Self {
        Self {
            tiers: vec![
                Tier {
                    name: "mobile",
                    max_width: Some(MOBILE_MAX_WIDTH),
                    config: GridConfig::from_tuple(MOBILE_GRID),
                },
                Tier {
                    name: "desktop",
                    max_width: Some(DESKTOP_MAX_WIDTH),
                    config: GridConfig::from_tuple(DESKTOP_GRID),
                },
                Tier {
                    name: "large",
                    max_width: Some(LARGE_MAX_WIDTH),
                    config: GridConfig::from_tuple(LARGE_GRID),
                },
                Tier {
                    name: "ultrawide",
                    max_width: None,
                    config: GridConfig::from_tuple(ULTRAWIDE_GRID),
                },
            ],
            default_index: 1,
            low_power_cap: 1,
        }
    }

    /// Resolve a width to a tier index. The index is only in range for a
    /// non-empty table.
    pub fn select_index(&self, width: f32, device: DeviceClass) -> usize {
        let last = self.tiers.len().saturating_sub(1);
        let index = if !width.is_finite() || width <= 0.0 {
            self.default_index.min(last)
        } else {
            self.tiers
                .iter()
                .position(|t| t.max_width.map_or(true, |max| width < max))
                .unwrap_or(last)
        };
        match device {
            DeviceClass::Standard => index,
            DeviceClass::LowPower => index.min(self.low_power_cap),
        }
    }

    /// Grid configuration for `width`; `None` only for an empty table.
    pub fn select(&self, width: f32, device: DeviceClass) -> Option<GridConfig> {
        self.tier(self.select_index(width, device)).map(|t| t.config)
    }

    pub fn tier(&self, index: usize) -> Option<&Tier> {
        self.tiers.get(index)
    }
}

/// Coalesces bursts of resize events into one width.
///
/// The newest width wins; it is handed out once no new event has arrived for
/// `settle` seconds.
#[derive(Clone, Debug)]
pub struct ResizeDebouncer {
    settle: f32,
    pending: Option<PendingResize>,
}

#[derive(Clone, Copy, Debug)]
struct PendingResize {
    width: f32,
    device: DeviceClass,
    at: f32,
}

impl ResizeDebouncer {
    pub fn new(settle: f32) -> Self {
        Self {
            settle: settle.max(0.0),
            pending: None,
        }
    }

    pub fn push(&mut self, width: f32, device: DeviceClass, now: f32) {
        self.pending = Some(PendingResize {
            width,
            device,
            at: now,
        });
    }

    pub fn poll(&mut self, now: f32) -> Option<(f32, DeviceClass)> {
        match self.pending {
            Some(p) if now - p.at >= self.settle => {
                self.pending = None;
                Some((p.width, p.device))
            }
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl Default for ResizeDebouncer {
    fn default() -> Self {
        Self::new(RESIZE_SETTLE_SEC)
    }
}
