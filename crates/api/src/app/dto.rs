use stockcheck_core::SkuCode;

/// Query parameter carrying the requested SKU codes.
pub const SKU_CODE_PARAM: &str = "skuCode";

/// Collect SKU codes from a raw query string.
///
/// The parameter may repeat (`skuCode=A1&skuCode=B2`) and each value may
/// hold a comma-separated list (`skuCode=A1,B2`). Values are trimmed and
/// empty ones dropped; order and duplicates are kept. Other parameters are
/// ignored.
pub fn sku_codes_from_query(raw: Option<&str>) -> Vec<SkuCode> {
    let Some(raw) = raw else {
        return vec![];
    };

    url::form_urlencoded::parse(raw.as_bytes())
        .filter(|(key, _)| key == SKU_CODE_PARAM)
        .flat_map(|(_, value)| {
            value
                .split(',')
                .map(str::trim)
                .filter(|code| !code.is_empty())
                .map(SkuCode::from)
                .collect::<Vec<_>>()
        })
        .collect()
}
