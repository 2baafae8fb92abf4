/// Columns every statement header must carry, matched case-sensitively.
pub const REQUIRED_COLUMNS: [&str; 6] = ["OPERACION", "LIQUIDACION", "CARGOS", "ABONOS", "RFC", "REFERENCIA"];

/// Returns true when every required column is present, in any order.
/// Extra columns are ignored.
pub fn validate_header<S: AsRef<str>>(header: &[S]) -> bool {
    missing_columns(header).is_empty()
}

/// Required columns absent from `header`, in schema order.
pub fn missing_columns<S: AsRef<str>>(header: &[S]) -> Vec<&'static str> {
    REQUIRED_COLUMNS.iter()
        .copied()
        .filter(|required| !header.iter().any(|column| column.as_ref() == *required))
        .collect()
}
