use lopdf::Object;
use lopdf::content::Operation;

use crate::error::OperandMismatch;
use crate::glyph::GlyphDecoding;
use crate::model::PositionedFragment;
use crate::schema::TableSchema;

fn describe(object: &Object) -> &'static str {
    match object {
        Object::Null => "null",
        Object::Boolean(_) => "boolean",
        Object::Integer(_) => "integer",
        Object::Real(_) => "real",
        Object::Name(_) => "name",
        Object::String(..) => "string",
        Object::Array(_) => "array",
        Object::Dictionary(_) => "dictionary",
        Object::Stream(_) => "stream",
        Object::Reference(_) => "reference",
    }
}

fn mismatch(operation: &Operation, expected: &'static str, found: &Object) -> OperandMismatch {
    OperandMismatch {
        operator: operation.operator.clone(),
        expected,
        found: describe(found),
    }
}

fn number_operand(operation: &Operation, index: usize) -> Result<f64, OperandMismatch> {
    let operand = &operation.operands[index];
    operand
        .as_float()
        .map(f64::from)
        .map_err(|_| mismatch(operation, "a number", operand))
}

fn shown_bytes(operation: &Operation) -> Result<Option<Vec<u8>>, OperandMismatch> {
    let Some(operand) = operation.operands.first() else {
        return Ok(None);
    };

    match (operation.operator.as_str(), operand) {
        ("Tj", Object::String(bytes, _)) => Ok(Some(bytes.clone())),
        ("Tj", other) => Err(mismatch(operation, "a string", other)),
        ("TJ", Object::Array(items)) => Ok(Some(
            items
                .iter()
                .filter_map(|item| match item {
                    Object::String(bytes, _) => Some(bytes.as_slice()),
                    _ => None,
                })
                .flatten()
                .copied()
                .collect(),
        )),
        ("TJ", other) => Err(mismatch(operation, "an array", other)),
        _ => Ok(None),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn round_up(value: f64) -> i32 {
    value.ceil() as i32
}

/// Positioning operands replace the cursor; they are not added to it.
pub fn extract_fragments<F>(
    operations: &[Operation],
    schema: &TableSchema<'_, F>,
    decoding: GlyphDecoding,
) -> Result<Vec<PositionedFragment>, OperandMismatch> {
    let positioning = schema.positioning;
    let (x_index, y_index) = positioning.translation();

    let mut fragments = Vec::new();
    let mut x = 0.0_f64;
    let mut y = 0.0_f64;
    let mut admitted = false;

    for operation in operations {
        if operation.operator == positioning.operator()
            && operation.operands.len() == positioning.arity()
        {
            x = number_operand(operation, x_index)?;
            y = number_operand(operation, y_index)?;
            admitted = schema.window.contains(y);
            continue;
        }

        if !admitted {
            continue;
        }

        let Some(bytes) = shown_bytes(operation)? else {
            continue;
        };
        let text = decoding.decode(&bytes);
        if text.trim().is_empty() {
            continue;
        }
        fragments.push(PositionedFragment {
            x: round_up(x),
            y: round_up(y),
            text,
        });
    }

    Ok(fragments)
}

/// Ignores the window and skips malformed operands; only used to recognize the table kind.
#[must_use]
pub fn page_text(operations: &[Operation], decoding: GlyphDecoding) -> String {
    let mut text = String::new();
    for operation in operations {
        match operation.operator.as_str() {
            "Tj" | "TJ" => {
                if let Ok(Some(bytes)) = shown_bytes(operation) {
                    text.push_str(&decoding.decode(&bytes));
                }
            }
            "Td" | "TD" | "T*" | "Tm" | "ET" => {
                if !text.is_empty() && !text.ends_with('\n') {
                    text.push('\n');
                }
            }
            _ => {}
        }
    }
    text
}
