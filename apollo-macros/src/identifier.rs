use crate::derive_utils::apply_derives;
use proc_macro::TokenStream;
use quote::quote;
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{Item, Result, Token, parse::Parse, parse::ParseStream, parse_macro_input};

/// #[identifier] 宏实现
/// 仅支持包裹 `String` 的单字段 tuple struct，为其：
/// - 合并/追加派生：Clone, (Debug 可控), Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord
/// - serde 以字符串透明形式序列化，反序列化时走校验
/// - 提供 new(..)、as_str()、Display、FromStr、TryFrom、AsRef<str>、Borrow<str>、From<Self> for String
/// 构造一律经过 `::apollo_core::value_object::ValueObject::validate`。
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let cfg = parse_macro_input!(attr as IdentifierAttrConfig);
    let input = parse_macro_input!(item as Item);

    let mut st = match input {
        Item::Struct(s) => s,
        other => {
            return syn::Error::new(other.span(), "#[identifier] only on struct")
                .to_compile_error()
                .into();
        }
    };

    match &st.fields {
        syn::Fields::Unnamed(f) if f.unnamed.len() == 1 => {
            let ty = &f.unnamed[0].ty;
            let is_string = matches!(
                ty,
                syn::Type::Path(p) if p.path.segments.last().is_some_and(|s| s.ident == "String")
            );
            if !is_string {
                return syn::Error::new(ty.span(), "#[identifier] requires a `String` field")
                    .to_compile_error()
                    .into();
            }
        }
        _ => {
            return syn::Error::new(
                st.span(),
                "#[identifier] supports only tuple struct, e.g., struct X(String);",
            )
            .to_compile_error()
            .into();
        }
    }

    let mut required: Vec<syn::Path> = vec![
        syn::parse_quote!(Clone),
        syn::parse_quote!(serde::Serialize),
        syn::parse_quote!(serde::Deserialize),
        syn::parse_quote!(PartialEq),
        syn::parse_quote!(Eq),
        syn::parse_quote!(Hash),
        syn::parse_quote!(PartialOrd),
        syn::parse_quote!(Ord),
    ];
    if cfg.derive_debug.unwrap_or(true) {
        required.insert(1, syn::parse_quote!(Debug));
    }
    apply_derives(&mut st.attrs, required);
    st.attrs
        .push(syn::parse_quote!(#[serde(try_from = "String", into = "String")]));

    let ident = &st.ident;
    let (impl_generics, ty_generics, where_clause) = st.generics.split_for_impl();
    let vo = quote!(::apollo_core::value_object::ValueObject);

    let out = quote! {
        #st

        impl #impl_generics #ident #ty_generics #where_clause {
            /// 校验后构造
            pub fn new(
                value: impl ::core::convert::Into<::std::string::String>,
            ) -> ::std::result::Result<Self, <Self as #vo>::Error> {
                let candidate = Self(value.into());
                #vo::validate(&candidate)?;
                ::std::result::Result::Ok(candidate)
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl #impl_generics ::std::fmt::Display for #ident #ty_generics #where_clause {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl #impl_generics ::std::str::FromStr for #ident #ty_generics #where_clause {
            type Err = <Self as #vo>::Error;
            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl #impl_generics ::core::convert::TryFrom<::std::string::String> for #ident #ty_generics #where_clause {
            type Error = <Self as #vo>::Error;
            fn try_from(value: ::std::string::String) -> ::std::result::Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl #impl_generics ::core::convert::TryFrom<&str> for #ident #ty_generics #where_clause {
            type Error = <Self as #vo>::Error;
            fn try_from(value: &str) -> ::std::result::Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl #impl_generics ::core::convert::AsRef<str> for #ident #ty_generics #where_clause {
            fn as_ref(&self) -> &str { &self.0 }
        }

        impl #impl_generics ::std::borrow::Borrow<str> for #ident #ty_generics #where_clause {
            fn borrow(&self) -> &str { &self.0 }
        }

        impl #impl_generics ::core::convert::From<#ident #ty_generics> for ::std::string::String #where_clause {
            fn from(value: #ident #ty_generics) -> Self { value.0 }
        }
    };

    TokenStream::from(out)
}

// -------- parsing --------

struct IdentifierAttrConfig {
    derive_debug: Option<bool>,
}

impl Parse for IdentifierAttrConfig {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut derive_debug = None;
        let pairs: Punctuated<syn::MetaNameValue, Token![,]> =
            Punctuated::parse_terminated(input)?;

        for kv in pairs {
            if !kv.path.is_ident("debug") {
                return Err(syn::Error::new(
                    kv.path.span(),
                    "unknown key in attribute; expected 'debug'",
                ));
            }
            if derive_debug.is_some() {
                return Err(syn::Error::new(
                    kv.path.span(),
                    "duplicate key 'debug' in attribute",
                ));
            }
            match kv.value {
                syn::Expr::Lit(syn::ExprLit {
                    lit: syn::Lit::Bool(b),
                    ..
                }) => derive_debug = Some(b.value()),
                other => {
                    return Err(syn::Error::new(
                        other.span(),
                        "expected boolean literal for 'debug'",
                    ));
                }
            }
        }

        Ok(Self { derive_debug })
    }
}
