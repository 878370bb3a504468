//! Identifier helpers shared by the emitters.

/// Render reading `prop` off `obj`: `obj.prop`, or `obj["prop-name"]` when
/// the property name is not a plain identifier (wire names like `$skip` are).
pub fn member_access(obj: &str, prop: &str) -> String {
    let mut chars = prop.chars();
    let is_identifier = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');

    if is_identifier {
        format!("{obj}.{prop}")
    } else {
        let quoted = prop.replace('\\', "\\\\").replace('"', "\\\"");
        format!("{obj}[\"{quoted}\"]")
    }
}
