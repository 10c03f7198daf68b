use proc_macro::TokenStream;
use quote::quote;
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{Item, Result, Token, parse::Parse, parse::ParseStream, parse_macro_input};

/// #[command(id = "...")] 宏实现
/// - 适用于结构体或枚举，原样输出条目
/// - 为其实现 `::apollo_core::command::NamedCommand`（`ID` 常量与 `command_id()`）
/// - id 在编译期校验：不能为空、首尾不能有空白
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let cfg = parse_macro_input!(attr as CommandAttrConfig);
    let input = parse_macro_input!(item as Item);

    let (ident, generics) = match &input {
        Item::Struct(s) => (&s.ident, &s.generics),
        Item::Enum(e) => (&e.ident, &e.generics),
        other => {
            return syn::Error::new(other.span(), "#[command] only supports struct or enum")
                .to_compile_error()
                .into();
        }
    };

    let Some(id) = cfg.id else {
        return syn::Error::new(
            proc_macro2::Span::call_site(),
            "missing key 'id', e.g. #[command(id = \"app.save\")]",
        )
        .to_compile_error()
        .into();
    };

    let value = id.value();
    if value.trim().is_empty() {
        return syn::Error::new(id.span(), "command id must not be empty")
            .to_compile_error()
            .into();
    }
    if value.trim() != value {
        return syn::Error::new(
            id.span(),
            "command id must not start or end with whitespace",
        )
        .to_compile_error()
        .into();
    }

    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let out = quote! {
        #input

        impl #impl_generics ::apollo_core::command::NamedCommand for #ident #ty_generics #where_clause {
            const ID: &'static str = #id;

            fn command_id() -> ::apollo_core::command_id::CommandId {
                ::apollo_core::command_id::CommandId::__from_checked(Self::ID)
            }
        }
    };

    TokenStream::from(out)
}

// -------- parsing --------

struct CommandAttrConfig {
    id: Option<syn::LitStr>,
}

impl Parse for CommandAttrConfig {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut id: Option<syn::LitStr> = None;
        let pairs: Punctuated<syn::MetaNameValue, Token![,]> =
            Punctuated::parse_terminated(input)?;

        for kv in pairs {
            if !kv.path.is_ident("id") {
                return Err(syn::Error::new(
                    kv.path.span(),
                    "unknown key in attribute; expected 'id'",
                ));
            }
            if id.is_some() {
                return Err(syn::Error::new(
                    kv.path.span(),
                    "duplicate key 'id' in attribute",
                ));
            }
            match kv.value {
                syn::Expr::Lit(syn::ExprLit {
                    lit: syn::Lit::Str(lit),
                    ..
                }) => id = Some(lit),
                other => {
                    return Err(syn::Error::new(
                        other.span(),
                        "expected string literal for 'id'",
                    ));
                }
            }
        }

        Ok(Self { id })
    }
}
