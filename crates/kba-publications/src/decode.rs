use crate::columns::nearest_column;
use crate::diagnostic::{Diagnostic, DiagnosticCode};
use crate::model::{CellValue, FieldKind, PositionedFragment, RecordField, TableRecord};
use crate::schema::Column;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldIssue {
    UnmappedColumn { anchor: i32, text: String },
    InvalidInteger { field: &'static str, text: String },
}

impl FieldIssue {
    #[must_use]
    pub fn into_diagnostic(self) -> Diagnostic {
        match self {
            Self::UnmappedColumn { anchor, text } => Diagnostic::new(
                DiagnosticCode::UnmappedColumn,
                format!("no field is mapped to column anchor {anchor}"),
            )
            .with_anchor(anchor)
            .with_text(text),
            Self::InvalidInteger { field, text } => Diagnostic::new(
                DiagnosticCode::InvalidInteger,
                format!("`{text}` is not an integer; {field} left unset"),
            )
            .with_field(field)
            .with_text(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedRow<R> {
    pub record: R,
    pub issues: Vec<FieldIssue>,
}

/// A later fragment in the same column overwrites an earlier one.
#[must_use]
pub fn decode_row<R: TableRecord>(
    row: &[PositionedFragment],
    columns: &[Column<R::Field>],
) -> DecodedRow<R> {
    let mut record = R::default();
    let mut issues = Vec::new();

    for fragment in row {
        let Some(column) = nearest_column(fragment.x, columns) else {
            continue;
        };
        let Some(field) = column.field else {
            tracing::debug!(anchor = column.anchor, text = %fragment.text, "unmapped column");
            issues.push(FieldIssue::UnmappedColumn {
                anchor: column.anchor,
                text: fragment.text.clone(),
            });
            continue;
        };

        match field.kind() {
            FieldKind::Text => record.assign(field, CellValue::Text(fragment.text.clone())),
            FieldKind::Integer => match fragment.text.parse::<i64>() {
                Ok(number) => record.assign(field, CellValue::Integer(number)),
                Err(_) => {
                    tracing::debug!(field = field.name(), text = %fragment.text, "invalid integer");
                    issues.push(FieldIssue::InvalidInteger {
                        field: field.name(),
                        text: fragment.text.clone(),
                    });
                }
            },
        }
    }

    DecodedRow { record, issues }
}

#[cfg(test)]
mod tests {
    use super::{FieldIssue, decode_row};
    use crate::diagnostic::DiagnosticCode;
    use crate::model::{EnergySourceField, EnergySourceRecord, PositionedFragment, VehicleRecord};
    use crate::schema::{Column, ENERGY_SOURCE_SCHEMA, VEHICLE_SCHEMA};

    fn fragment(x: i32, text: &str) -> PositionedFragment {
        PositionedFragment::new(x, 300, text)
    }

    #[test]
    fn maps_every_vehicle_column() {
        let texts = [
            "0005",
            "ABC",
            "BMW AG",
            "BMW",
            "320d",
            "01.02.2015",
            "M1",
            "AB",
            "02",
            "140",
            "1995",
            "2",
            "1",
            "5",
            "2100",
        ];
        let row = texts
            .iter()
            .zip(VEHICLE_SCHEMA.anchors())
            .map(|(text, anchor)| fragment(anchor + 1, text))
            .collect::<Vec<_>>();

        let decoded = decode_row::<VehicleRecord>(&row, VEHICLE_SCHEMA.columns);
        assert!(decoded.issues.is_empty());
        let record = decoded.record;
        assert_eq!(record.manufacturer_code_number.as_deref(), Some("0005"));
        assert_eq!(record.commercial_name.as_deref(), Some("320d"));
        assert_eq!(
            record.type_code_number_allotment_date.as_deref(),
            Some("01.02.2015")
        );
        assert_eq!(record.fuel_code.as_deref(), Some("02"));
        assert_eq!(record.max_net_power, Some(140));
        assert_eq!(record.engine_capacity, Some(1995));
        assert_eq!(record.max_permissible_mass, Some(2100));
    }

    #[test]
    fn invalid_integer_is_left_unset() {
        let row = [fragment(652, "12a"), fragment(767, "0")];
        let decoded = decode_row::<VehicleRecord>(&row, VEHICLE_SCHEMA.columns);
        assert_eq!(decoded.record.max_net_power, None);
        assert_eq!(decoded.record.max_seats, Some(0));
        assert_eq!(
            decoded.issues,
            vec![FieldIssue::InvalidInteger {
                field: "maxNetPower",
                text: "12a".to_string(),
            }]
        );
    }

    #[test]
    fn signed_integers_parse_but_padded_ones_do_not() {
        let row = [
            fragment(712, "-1"),
            fragment(736, "+2"),
            fragment(790, " 3"),
        ];
        let decoded = decode_row::<VehicleRecord>(&row, VEHICLE_SCHEMA.columns);
        assert_eq!(decoded.record.max_axles, Some(-1));
        assert_eq!(decoded.record.max_powered_axles, Some(2));
        assert_eq!(decoded.record.max_permissible_mass, None);
    }

    #[test]
    fn last_duplicate_wins() {
        let row = [fragment(190, "Benzin"), fragment(195, "Super")];
        let decoded = decode_row::<EnergySourceRecord>(&row, ENERGY_SOURCE_SCHEMA.columns);
        assert_eq!(decoded.record.short_name.as_deref(), Some("Super"));
        assert_eq!(decoded.record.code, None);
    }

    #[test]
    fn unmapped_column_is_reported_not_fatal() {
        let columns = [
            Column::new(191, EnergySourceField::ShortName),
            Column::new(337, EnergySourceField::Code),
            Column::unmapped(500),
        ];
        let row = [
            fragment(191, "Diesel"),
            fragment(498, "stray"),
            fragment(337, "0002"),
        ];
        let decoded = decode_row::<EnergySourceRecord>(&row, &columns);

        assert_eq!(decoded.record.short_name.as_deref(), Some("Diesel"));
        assert_eq!(decoded.record.code.as_deref(), Some("0002"));
        assert_eq!(decoded.issues.len(), 1);

        let diagnostic = decoded.issues[0].clone().into_diagnostic();
        assert_eq!(diagnostic.code, DiagnosticCode::UnmappedColumn);
        assert_eq!(diagnostic.anchor, Some(500));
        assert_eq!(diagnostic.text.as_deref(), Some("stray"));
    }
}
