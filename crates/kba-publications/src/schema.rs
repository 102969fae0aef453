use crate::model::{EnergySourceField, VehicleField};

pub const ENERGY_SOURCE_HEADER: &str = "Kraftstoffart bzw. Energiequelle";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalWindow {
    pub min_y: f64,
    pub max_y: f64,
}

impl VerticalWindow {
    #[must_use]
    pub fn contains(self, y: f64) -> bool {
        (self.min_y..=self.max_y).contains(&y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Positioning {
    /// `a b c d e f Tm`, translation in operands 4 and 5.
    TextMatrix,
    /// `tx ty Td`. The operands are taken as the new cursor position.
    TextMove,
}

impl Positioning {
    #[must_use]
    pub fn operator(self) -> &'static str {
        match self {
            Self::TextMatrix => "Tm",
            Self::TextMove => "Td",
        }
    }

    #[must_use]
    pub fn arity(self) -> usize {
        match self {
            Self::TextMatrix => 6,
            Self::TextMove => 2,
        }
    }

    #[must_use]
    pub fn translation(self) -> (usize, usize) {
        match self {
            Self::TextMatrix => (4, 5),
            Self::TextMove => (0, 1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMarker {
    Any,
    HeaderPrefix(&'static str),
}

impl PageMarker {
    #[must_use]
    pub fn matches(self, page_text: &str) -> bool {
        match self {
            Self::Any => true,
            Self::HeaderPrefix(prefix) => page_text.trim_start().starts_with(prefix),
        }
    }
}

/// A column anchor. An anchor without a field still attracts fragments, which
/// are then reported as unmapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column<F> {
    pub anchor: i32,
    pub field: Option<F>,
}

impl<F> Column<F> {
    #[must_use]
    pub const fn new(anchor: i32, field: F) -> Self {
        Self {
            anchor,
            field: Some(field),
        }
    }

    #[must_use]
    pub const fn unmapped(anchor: i32) -> Self {
        Self {
            anchor,
            field: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableSchema<'a, F> {
    pub name: &'static str,
    pub columns: &'a [Column<F>],
    pub window: VerticalWindow,
    pub positioning: Positioning,
    /// Pages yielding fewer fragments than this produce no rows.
    pub min_fragments: usize,
    pub marker: PageMarker,
}

impl<F> TableSchema<'_, F> {
    pub fn anchors(&self) -> impl Iterator<Item = i32> + '_ {
        self.columns.iter().map(|column| column.anchor)
    }
}

pub const VEHICLE_SCHEMA: TableSchema<'static, VehicleField> = TableSchema {
    name: "vehicle",
    columns: &[
        Column::new(35, VehicleField::ManufacturerCodeNumber),
        Column::new(67, VehicleField::TypeCodeNumber),
        Column::new(95, VehicleField::ManufacturerPlaintext),
        Column::new(220, VehicleField::ManufacturerTradeName),
        Column::new(337, VehicleField::CommercialName),
        Column::new(460, VehicleField::TypeCodeNumberAllotmentDate),
        Column::new(544, VehicleField::VehicleCategory),
        Column::new(598, VehicleField::BodyworkCode),
        Column::new(620, VehicleField::FuelCode),
        Column::new(652, VehicleField::MaxNetPower),
        Column::new(676, VehicleField::EngineCapacity),
        Column::new(712, VehicleField::MaxAxles),
        Column::new(736, VehicleField::MaxPoweredAxles),
        Column::new(767, VehicleField::MaxSeats),
        Column::new(790, VehicleField::MaxPermissibleMass),
    ],
    window: VerticalWindow {
        min_y: 134.0,
        max_y: 575.0,
    },
    positioning: Positioning::TextMove,
    min_fragments: 4,
    marker: PageMarker::Any,
};

pub const ENERGY_SOURCE_SCHEMA: TableSchema<'static, EnergySourceField> = TableSchema {
    name: "energy-source",
    columns: &[
        Column::new(191, EnergySourceField::ShortName),
        Column::new(337, EnergySourceField::Code),
    ],
    window: VerticalWindow {
        min_y: 66.0,
        max_y: 690.0,
    },
    positioning: Positioning::TextMatrix,
    min_fragments: 2,
    marker: PageMarker::HeaderPrefix(ENERGY_SOURCE_HEADER),
};
