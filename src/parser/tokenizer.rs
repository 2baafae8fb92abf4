/// Splits one statement line into trimmed fields.
///
/// A `"` toggles quoted mode and is dropped; commas inside quotes are kept as
/// content. Escaped quotes are not understood: `""` closes and immediately
/// reopens the quoted section. Malformed quoting never fails, it just yields
/// whatever split the toggles produce.
pub fn tokenize_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for character in line.chars() {
        match character {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(character)
        }
    }

    fields.push(current.trim().to_string());

    fields
}
