use quote::ToTokens;
use std::collections::HashSet;
use syn::punctuated::Punctuated;
use syn::{Attribute, Token};

/// 把 `required` 并入枚举上已有的 `#[derive(..)]`，按末段名去重，
/// 合并结果放在第一个属性位置，`#[serde(..)]` 等辅助属性保持在其后
pub(crate) fn apply_derives(attrs: &mut Vec<Attribute>, required: Vec<syn::Path>) {
    let mut derives = required;
    let mut others = Vec::with_capacity(attrs.len());
    for attr in attrs.drain(..) {
        if attr.path().is_ident("derive") {
            derives.extend(derive_list(&attr));
        } else {
            others.push(attr);
        }
    }

    let mut seen = HashSet::new();
    derives.retain(|p| seen.insert(derive_name(p)));

    attrs.push(syn::parse_quote!(#[derive(#(#derives),*)]));
    attrs.extend(others);
}

fn derive_list(attr: &Attribute) -> Vec<syn::Path> {
    attr.parse_args_with(Punctuated::<syn::Path, Token![,]>::parse_terminated)
        .map(|list| list.into_iter().collect())
        .unwrap_or_default()
}

// `serde::Serialize` 与 `Serialize` 视为同一个 derive
fn derive_name(path: &syn::Path) -> String {
    match path.segments.last() {
        Some(seg) => seg.ident.to_string(),
        None => path.to_token_stream().to_string(),
    }
}

/// `RestaurantSelected` -> `RESTAURANT_SELECTED`，连续大写视为缩写：`HTTPFailed` -> `HTTP_FAILED`
pub(crate) fn to_screaming_snake(ident: &str) -> String {
    let chars: Vec<char> = ident.chars().collect();
    let mut out = String::with_capacity(ident.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower)
            {
                out.push('_');
            }
        }
        out.extend(c.to_uppercase());
    }
    out
}
