use crate::{context::EmptyTypeContext, EvmType, TypeContext, TypesError};

/// Parses a surface-language type spelling into an [`EvmType`].
///
/// Accepts `u256`/`i128`-style short spellings, the `Uint<N>`/`Int<N>`/
/// `Bytes<N>` generic forms, `bool`/`address`/`bytes`/`string`, array
/// suffixes (`T[]`, `CalldataArray<T>`), `Mapping<K, V>`, comma-separated
/// parenthesized tuples, and any name `ctx` resolves as an enum or struct.
pub fn parse_type(spelling: &str, ctx: &dyn TypeContext) -> Result<EvmType, TypesError> {
    let s = spelling.trim();

    if let Some(inner) = strip_wrapper(s, "Mapping<") {
        let (key, value) = split_one_comma(inner)?;
        return Ok(EvmType::Mapping(
            Box::new(parse_type(key, ctx)?),
            Box::new(parse_type(value, ctx)?),
        ));
    }

    if let Some(inner) = strip_wrapper(s, "CalldataArray<") {
        return Ok(EvmType::Array(Box::new(parse_type(inner, ctx)?)));
    }

    if let Some(base) = s.strip_suffix("[]") {
        return Ok(EvmType::Array(Box::new(parse_type(base, ctx)?)));
    }

    if let Some(inner) = strip_wrapper(s, "Uint<") {
        return Ok(EvmType::Uint(parse_bits(inner)?));
    }
    if let Some(inner) = strip_wrapper(s, "Int<") {
        return Ok(EvmType::Int(parse_bits(inner)?));
    }
    if let Some(inner) = strip_wrapper(s, "Bytes<") {
        return Ok(EvmType::FixedBytes(parse_bytes_size(inner)?));
    }

    if s.starts_with('(') && s.ends_with(')') {
        let inner = &s[1..s.len() - 1];
        let elems = split_top_level_commas(inner)?
            .into_iter()
            .map(|part| parse_type(part, ctx))
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(EvmType::Tuple(elems));
    }

    match s {
        "bool" => return Ok(EvmType::Bool),
        "address" => return Ok(EvmType::Address),
        "bytes" => return Ok(EvmType::Bytes),
        "string" => return Ok(EvmType::String),
        _ => {}
    }

    // Canonical ABI spellings (`uint256`, `int128`) and surface short
    // spellings (`u256`, `i128`) are both accepted, so `from_solidity_type`
    // and `parse_type` can share this grammar.
    if let Some(digits) = s.strip_prefix("uint").or_else(|| s.strip_prefix('u')) {
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            return Ok(EvmType::Uint(parse_bits(digits)?));
        }
    }
    if let Some(digits) = s.strip_prefix("int").or_else(|| s.strip_prefix('i')) {
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            return Ok(EvmType::Int(parse_bits(digits)?));
        }
    }
    if let Some(digits) = s.strip_prefix("bytes") {
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            return Ok(EvmType::FixedBytes(parse_bytes_size(digits)?));
        }
    }

    if ctx.is_enum(s) {
        return Ok(EvmType::Enum(s.to_owned()));
    }
    if ctx.get_struct_type(s).is_some() {
        return Ok(EvmType::Struct(s.to_owned()));
    }

    Err(TypesError::Unknown(s.to_owned()))
}

/// Parses a canonical Solidity ABI type string, e.g. `uint256`, `address`,
/// `bytes32[]`, `(uint256,address)`. User-declared enum/struct names are
/// never canonical, so this never resolves against a [`TypeContext`].
pub fn from_solidity_type(spelling: &str) -> Result<EvmType, TypesError> {
    parse_type(spelling, &EmptyTypeContext)
}

/// Renders the canonical Solidity ABI spelling of `ty`: `uint256`,
/// `int128`, `address`, `bytes32`, `bytes`, `uint256[]`, `(T1,T2)` for
/// tuples. `Enum`/`Struct` render as their lowered primitive.
pub fn to_solidity_type(ty: &EvmType) -> String {
    match ty {
        EvmType::Uint(bits) => format!("uint{bits}"),
        EvmType::Int(bits) => format!("int{bits}"),
        EvmType::Bool => "bool".to_owned(),
        EvmType::Address => "address".to_owned(),
        EvmType::FixedBytes(size) => format!("bytes{size}"),
        EvmType::Bytes => "bytes".to_owned(),
        EvmType::String => "string".to_owned(),
        EvmType::Array(elem) => format!("{}[]", to_solidity_type(elem)),
        EvmType::Mapping(key, value) => {
            format!("mapping({}=>{})", to_solidity_type(key), to_solidity_type(value))
        }
        EvmType::Tuple(elems) => {
            let mut out = String::from("(");
            for (i, elem) in elems.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&to_solidity_type(elem));
            }
            out.push(')');
            out
        }
        EvmType::Enum(_) => "uint8".to_owned(),
        EvmType::Struct(_) => "uint256".to_owned(),
    }
}

fn parse_bits(digits: &str) -> Result<u16, TypesError> {
    let bits: u16 = digits.parse().map_err(|_| TypesError::InvalidBitWidth)?;
    if bits < 8 || bits > 256 || bits % 8 != 0 {
        return Err(TypesError::InvalidBitWidth);
    }
    Ok(bits)
}

fn parse_bytes_size(digits: &str) -> Result<u8, TypesError> {
    let size: u16 = digits.parse().map_err(|_| TypesError::InvalidBytesSize)?;
    if size < 1 || size > 32 {
        return Err(TypesError::InvalidBytesSize);
    }
    Ok(size as u8)
}

fn strip_wrapper<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    s.strip_prefix(prefix).and_then(|rest| rest.strip_suffix('>'))
}

fn split_one_comma(s: &str) -> Result<(&str, &str), TypesError> {
    let parts = split_top_level_commas(s)?;
    match parts.as_slice() {
        [key, value] => Ok((key, value)),
        _ => Err(TypesError::Malformed(s.to_owned())),
    }
}

/// Splits `s` on commas that are not nested inside `<...>` or `(...)`.
fn split_top_level_commas(s: &str) -> Result<Vec<&str>, TypesError> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0usize;
    for (i, c) in s.char_indices() {
        match c {
            '<' | '(' => depth += 1,
            '>' | ')' => depth -= 1,
            ',' if depth == 0 => {
                parts.push(s[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(TypesError::Malformed(s.to_owned()));
    }
    parts.push(s[start..].trim());
    if parts.iter().any(|p| p.is_empty()) {
        return Err(TypesError::Malformed(s.to_owned()));
    }
    Ok(parts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::EmptyTypeContext;

    #[test]
    fn parses_scalars() {
        let ctx = EmptyTypeContext;
        assert_eq!(parse_type("u256", &ctx).unwrap(), EvmType::Uint(256));
        assert_eq!(parse_type("i128", &ctx).unwrap(), EvmType::Int(128));
        assert_eq!(parse_type("bool", &ctx).unwrap(), EvmType::Bool);
        assert_eq!(parse_type("address", &ctx).unwrap(), EvmType::Address);
        assert_eq!(parse_type("bytes32", &ctx).unwrap(), EvmType::FixedBytes(32));
        assert_eq!(parse_type("Uint<64>", &ctx).unwrap(), EvmType::Uint(64));
    }

    #[test]
    fn rejects_invalid_bit_width() {
        let ctx = EmptyTypeContext;
        assert_eq!(parse_type("u9", &ctx), Err(TypesError::InvalidBitWidth));
        assert_eq!(parse_type("u264", &ctx), Err(TypesError::InvalidBitWidth));
    }

    #[test]
    fn rejects_invalid_bytes_size() {
        let ctx = EmptyTypeContext;
        assert_eq!(parse_type("bytes33", &ctx), Err(TypesError::InvalidBytesSize));
        assert_eq!(parse_type("bytes0", &ctx), Err(TypesError::InvalidBytesSize));
    }

    #[test]
    fn parses_mapping_and_array() {
        let ctx = EmptyTypeContext;
        let mapping = parse_type("Mapping<address, u256>", &ctx).unwrap();
        assert_eq!(
            mapping,
            EvmType::Mapping(Box::new(EvmType::Address), Box::new(EvmType::Uint(256)))
        );
        assert_eq!(
            parse_type("u256[]", &ctx).unwrap(),
            EvmType::Array(Box::new(EvmType::Uint(256)))
        );
    }

    #[test]
    fn parses_nested_tuple() {
        let ctx = EmptyTypeContext;
        let tuple = parse_type("(u256, (address, bool))", &ctx).unwrap();
        assert_eq!(
            tuple,
            EvmType::Tuple(vec![
                EvmType::Uint(256),
                EvmType::Tuple(vec![EvmType::Address, EvmType::Bool]),
            ])
        );
    }

    #[test]
    fn round_trips_canonical_spellings() {
        for spelling in ["uint256", "int128", "address", "bytes32", "bytes", "uint256[]"] {
            let ty = from_solidity_type(spelling).unwrap();
            assert_eq!(to_solidity_type(&ty), spelling);
        }
    }

    #[test]
    fn unknown_name_without_context_is_an_error() {
        let ctx = EmptyTypeContext;
        assert_eq!(parse_type("Foo", &ctx), Err(TypesError::Unknown("Foo".to_owned())));
    }
}
