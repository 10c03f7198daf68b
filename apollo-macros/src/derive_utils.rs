use quote::ToTokens;
use syn::{Attribute, Token};

// 拆分属性：返回（非 derive 属性, 已声明的 derive 路径）
fn take_derives(attrs: &[Attribute]) -> (Vec<Attribute>, Vec<syn::Path>) {
    let mut others = Vec::new();
    let mut declared = Vec::new();
    for attr in attrs {
        if !attr.path().is_ident("derive") {
            others.push(attr.clone());
            continue;
        }
        if let Ok(list) = attr.parse_args_with(
            syn::punctuated::Punctuated::<syn::Path, Token![,]>::parse_terminated,
        ) {
            declared.extend(list);
        }
    }
    (others, declared)
}

// derive 去重用的 key：serde 的派生按完整路径归一，其余取末段标识符
fn derive_key(p: &syn::Path) -> String {
    match p.segments.last() {
        Some(last) => {
            let ident = last.ident.to_string();
            if ident == "Serialize" || ident == "Deserialize" {
                format!("serde::{ident}")
            } else {
                ident
            }
        }
        None => p.to_token_stream().to_string(),
    }
}

/// 将宏要求的派生与用户已声明的派生合并为单个 `#[derive(..)]`，
/// 宏要求的派生排在前面，其余属性原样保留在其后。
pub(crate) fn apply_derives(attrs: &mut Vec<Attribute>, required: Vec<syn::Path>) {
    let (others, declared) = take_derives(attrs);

    let mut seen = std::collections::HashSet::new();
    let merged: Vec<syn::Path> = required
        .into_iter()
        .chain(declared)
        .filter(|p| seen.insert(derive_key(p)))
        .collect();

    let derive: Attribute = syn::parse_quote!(#[derive(#(#merged),*)]);
    *attrs = std::iter::once(derive).chain(others).collect();
}

