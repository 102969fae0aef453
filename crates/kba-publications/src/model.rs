use std::fmt::Debug;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionedFragment {
    pub x: i32,
    pub y: i32,
    pub text: String,
}

impl PositionedFragment {
    #[must_use]
    pub fn new(x: i32, y: i32, text: impl Into<String>) -> Self {
        Self {
            x,
            y,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
}

pub trait RecordField: Copy + Eq + Debug + 'static {
    fn kind(self) -> FieldKind;

    fn name(self) -> &'static str;
}

pub trait TableRecord: Default + Serialize {
    type Field: RecordField;

    const ENTITY_TYPE: &'static str;

    const FIELDS: &'static [Self::Field];

    /// Stores a decoded cell. Values whose kind does not match the field are ignored.
    fn assign(&mut self, field: Self::Field, value: CellValue);

    fn cell(&self, field: Self::Field) -> Option<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleField {
    ManufacturerCodeNumber,
    TypeCodeNumber,
    ManufacturerPlaintext,
    ManufacturerTradeName,
    CommercialName,
    TypeCodeNumberAllotmentDate,
    VehicleCategory,
    BodyworkCode,
    FuelCode,
    MaxNetPower,
    EngineCapacity,
    MaxAxles,
    MaxPoweredAxles,
    MaxSeats,
    MaxPermissibleMass,
}

impl RecordField for VehicleField {
    fn kind(self) -> FieldKind {
        match self {
            Self::MaxNetPower
            | Self::EngineCapacity
            | Self::MaxAxles
            | Self::MaxPoweredAxles
            | Self::MaxSeats
            | Self::MaxPermissibleMass => FieldKind::Integer,
            _ => FieldKind::Text,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::ManufacturerCodeNumber => "manufacturerCodeNumber",
            Self::TypeCodeNumber => "typeCodeNumber",
            Self::ManufacturerPlaintext => "manufacturerPlaintext",
            Self::ManufacturerTradeName => "manufacturerTradeName",
            Self::CommercialName => "commercialName",
            Self::TypeCodeNumberAllotmentDate => "typeCodeNumberAllotmentDate",
            Self::VehicleCategory => "vehicleCategory",
            Self::BodyworkCode => "bodyworkCode",
            Self::FuelCode => "fuelCode",
            Self::MaxNetPower => "maxNetPower",
            Self::EngineCapacity => "engineCapacity",
            Self::MaxAxles => "maxAxles",
            Self::MaxPoweredAxles => "maxPoweredAxles",
            Self::MaxSeats => "maxSeats",
            Self::MaxPermissibleMass => "maxPermissibleMass",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRecord {
    pub manufacturer_code_number: Option<String>,
    pub type_code_number: Option<String>,
    pub manufacturer_plaintext: Option<String>,
    pub manufacturer_trade_name: Option<String>,
    pub commercial_name: Option<String>,
    pub type_code_number_allotment_date: Option<String>,
    pub vehicle_category: Option<String>,
    pub bodywork_code: Option<String>,
    pub fuel_code: Option<String>,
    pub max_net_power: Option<i64>,
    pub engine_capacity: Option<i64>,
    pub max_axles: Option<i64>,
    pub max_powered_axles: Option<i64>,
    pub max_seats: Option<i64>,
    pub max_permissible_mass: Option<i64>,
}

impl VehicleRecord {
    fn text_slot(&mut self, field: VehicleField) -> Option<&mut Option<String>> {
        match field {
            VehicleField::ManufacturerCodeNumber => Some(&mut self.manufacturer_code_number),
            VehicleField::TypeCodeNumber => Some(&mut self.type_code_number),
            VehicleField::ManufacturerPlaintext => Some(&mut self.manufacturer_plaintext),
            VehicleField::ManufacturerTradeName => Some(&mut self.manufacturer_trade_name),
            VehicleField::CommercialName => Some(&mut self.commercial_name),
            VehicleField::TypeCodeNumberAllotmentDate => {
                Some(&mut self.type_code_number_allotment_date)
            }
            VehicleField::VehicleCategory => Some(&mut self.vehicle_category),
            VehicleField::BodyworkCode => Some(&mut self.bodywork_code),
            VehicleField::FuelCode => Some(&mut self.fuel_code),
            _ => None,
        }
    }

    fn integer_slot(&mut self, field: VehicleField) -> Option<&mut Option<i64>> {
        match field {
            VehicleField::MaxNetPower => Some(&mut self.max_net_power),
            VehicleField::EngineCapacity => Some(&mut self.engine_capacity),
            VehicleField::MaxAxles => Some(&mut self.max_axles),
            VehicleField::MaxPoweredAxles => Some(&mut self.max_powered_axles),
            VehicleField::MaxSeats => Some(&mut self.max_seats),
            VehicleField::MaxPermissibleMass => Some(&mut self.max_permissible_mass),
            _ => None,
        }
    }
}

impl TableRecord for VehicleRecord {
    type Field = VehicleField;

    const ENTITY_TYPE: &'static str = "VehicleCategoryM";

    const FIELDS: &'static [VehicleField] = &[
        VehicleField::ManufacturerCodeNumber,
        VehicleField::TypeCodeNumber,
        VehicleField::ManufacturerPlaintext,
        VehicleField::ManufacturerTradeName,
        VehicleField::CommercialName,
        VehicleField::TypeCodeNumberAllotmentDate,
        VehicleField::VehicleCategory,
        VehicleField::BodyworkCode,
        VehicleField::FuelCode,
        VehicleField::MaxNetPower,
        VehicleField::EngineCapacity,
        VehicleField::MaxAxles,
        VehicleField::MaxPoweredAxles,
        VehicleField::MaxSeats,
        VehicleField::MaxPermissibleMass,
    ];

    fn assign(&mut self, field: VehicleField, value: CellValue) {
        match value {
            CellValue::Text(text) => {
                if let Some(slot) = self.text_slot(field) {
                    *slot = Some(text);
                }
            }
            CellValue::Integer(number) => {
                if let Some(slot) = self.integer_slot(field) {
                    *slot = Some(number);
                }
            }
        }
    }

    fn cell(&self, field: VehicleField) -> Option<String> {
        let number = match field {
            VehicleField::ManufacturerCodeNumber => return self.manufacturer_code_number.clone(),
            VehicleField::TypeCodeNumber => return self.type_code_number.clone(),
            VehicleField::ManufacturerPlaintext => return self.manufacturer_plaintext.clone(),
            VehicleField::ManufacturerTradeName => return self.manufacturer_trade_name.clone(),
            VehicleField::CommercialName => return self.commercial_name.clone(),
            VehicleField::TypeCodeNumberAllotmentDate => {
                return self.type_code_number_allotment_date.clone();
            }
            VehicleField::VehicleCategory => return self.vehicle_category.clone(),
            VehicleField::BodyworkCode => return self.bodywork_code.clone(),
            VehicleField::FuelCode => return self.fuel_code.clone(),
            VehicleField::MaxNetPower => self.max_net_power,
            VehicleField::EngineCapacity => self.engine_capacity,
            VehicleField::MaxAxles => self.max_axles,
            VehicleField::MaxPoweredAxles => self.max_powered_axles,
            VehicleField::MaxSeats => self.max_seats,
            VehicleField::MaxPermissibleMass => self.max_permissible_mass,
        };
        number.map(|value| value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnergySourceField {
    ShortName,
    Code,
}

impl RecordField for EnergySourceField {
    fn kind(self) -> FieldKind {
        FieldKind::Text
    }

    fn name(self) -> &'static str {
        match self {
            Self::ShortName => "shortName",
            Self::Code => "code",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergySourceRecord {
    pub short_name: Option<String>,
    pub code: Option<String>,
}

impl TableRecord for EnergySourceRecord {
    type Field = EnergySourceField;

    const ENTITY_TYPE: &'static str = "EnergySource";

    const FIELDS: &'static [EnergySourceField] =
        &[EnergySourceField::ShortName, EnergySourceField::Code];

    fn assign(&mut self, field: EnergySourceField, value: CellValue) {
        let CellValue::Text(text) = value else {
            return;
        };
        match field {
            EnergySourceField::ShortName => self.short_name = Some(text),
            EnergySourceField::Code => self.code = Some(text),
        }
    }

    fn cell(&self, field: EnergySourceField) -> Option<String> {
        match field {
            EnergySourceField::ShortName => self.short_name.clone(),
            EnergySourceField::Code => self.code.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RecordSet {
    Vehicles(Vec<VehicleRecord>),
    EnergySources(Vec<EnergySourceRecord>),
}

impl RecordSet {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Vehicles(items) => items.len(),
            Self::EnergySources(items) => items.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Field names followed by one row of cells per record, unset cells empty.
    #[must_use]
    pub fn to_table(&self) -> (Vec<&'static str>, Vec<Vec<String>>) {
        match self {
            Self::Vehicles(items) => tabulate(items),
            Self::EnergySources(items) => tabulate(items),
        }
    }
}

fn tabulate<R: TableRecord>(items: &[R]) -> (Vec<&'static str>, Vec<Vec<String>>) {
    let headers = R::FIELDS.iter().map(|field| field.name()).collect();
    let rows = items
        .iter()
        .map(|item| {
            R::FIELDS
                .iter()
                .map(|field| item.cell(*field).unwrap_or_default())
                .collect()
        })
        .collect();
    (headers, rows)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResult {
    pub total: usize,
    pub entity_type: String,
    pub items: RecordSet,
}

impl ParseResult {
    #[must_use]
    pub fn new(entity_type: &str, items: RecordSet) -> Self {
        Self {
            total: items.len(),
            entity_type: entity_type.to_string(),
            items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        CellValue, EnergySourceRecord, ParseResult, RecordSet, TableRecord, VehicleField,
        VehicleRecord,
    };

    #[test]
    fn vehicle_assign_ignores_mismatched_kind() {
        let mut record = VehicleRecord::default();
        record.assign(VehicleField::MaxSeats, CellValue::Text("5".to_string()));
        record.assign(VehicleField::FuelCode, CellValue::Integer(7));
        assert_eq!(record, VehicleRecord::default());

        record.assign(VehicleField::MaxSeats, CellValue::Integer(5));
        assert_eq!(record.max_seats, Some(5));
        assert_eq!(record.cell(VehicleField::MaxSeats).as_deref(), Some("5"));
    }

    #[test]
    fn serializes_camel_case_with_nulls() {
        let record = VehicleRecord {
            manufacturer_code_number: Some("0005".to_string()),
            max_net_power: Some(0),
            ..VehicleRecord::default()
        };
        let json = serde_json::to_value(&record).expect("record should serialize");
        assert_eq!(json["manufacturerCodeNumber"], "0005");
        assert_eq!(json["maxNetPower"], 0);
        assert!(json["typeCodeNumberAllotmentDate"].is_null());
    }

    #[test]
    fn parse_result_total_matches_items() {
        let items = RecordSet::EnergySources(vec![
            EnergySourceRecord::default(),
            EnergySourceRecord {
                short_name: Some("Benzin".to_string()),
                code: Some("0001".to_string()),
            },
        ]);
        let result = ParseResult::new(EnergySourceRecord::ENTITY_TYPE, items);
        let json = serde_json::to_value(&result).expect("result should serialize");
        assert_eq!(json["total"], 2);
        assert_eq!(json["entityType"], "EnergySource");
        assert_eq!(json["items"][1]["shortName"], "Benzin");
    }

    #[test]
    fn tabulates_with_empty_cells() {
        let items = RecordSet::EnergySources(vec![EnergySourceRecord {
            short_name: None,
            code: Some("0004".to_string()),
        }]);
        let (headers, rows) = items.to_table();
        assert_eq!(headers, vec!["shortName", "code"]);
        assert_eq!(rows, vec![vec![String::new(), "0004".to_string()]]);
    }
}
