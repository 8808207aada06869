use crate::utils::{apply_derives, to_screaming_snake};
use proc_macro::TokenStream;
use quote::{format_ident, quote};
use std::collections::HashSet;
use syn::parse::{Parse, ParseStream, Parser};
use syn::spanned::Spanned;
use syn::{Ident, Item, Result, Type, parse_macro_input};

struct VariantDef {
    ident: Ident,
    payload: Type,
    wire: syn::LitStr,
}

/// #[app_event] 宏实现
/// - 仅支持单字段元组变体：`Variant(Payload)`
/// - 每个变体的线上名称唯一，缺省为变体名的 SCREAMING_SNAKE_CASE
/// - 生成配套 Kind 枚举、`BusEvent` 与逐载荷的 `EventPayload` 实现
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let cfg = parse_macro_input!(attr as AppEventAttrConfig);
    let mut input = parse_macro_input!(item as Item);

    let enum_item = match &mut input {
        Item::Enum(e) => e,
        other => {
            return syn::Error::new(other.span(), "#[app_event] can only be used on enum types")
                .to_compile_error()
                .into();
        }
    };

    if !enum_item.generics.params.is_empty() {
        return syn::Error::new(
            enum_item.generics.span(),
            "#[app_event] does not support generic enums",
        )
        .to_compile_error()
        .into();
    }

    let required: Vec<syn::Path> = vec![
        syn::parse_quote!(Debug),
        syn::parse_quote!(Clone),
        syn::parse_quote!(PartialEq),
        syn::parse_quote!(serde::Serialize),
        syn::parse_quote!(serde::Deserialize),
    ];
    apply_derives(&mut enum_item.attrs, required);

    let mut defs: Vec<VariantDef> = Vec::with_capacity(enum_item.variants.len());
    let mut seen_wire: HashSet<String> = HashSet::new();

    for v in &mut enum_item.variants {
        let payload = match &v.fields {
            syn::Fields::Unnamed(f) if f.unnamed.len() == 1 => f.unnamed[0].ty.clone(),
            _ => {
                return syn::Error::new(
                    v.span(),
                    "#[app_event] supports only single-field tuple variants, e.g., Variant(Payload)",
                )
                .to_compile_error()
                .into();
            }
        };

        let mut retained_attrs = Vec::new();
        let mut wire: Option<syn::LitStr> = None;

        for attr in v.attrs.iter() {
            if attr.path().is_ident("event") {
                match parse_variant_event_attr(attr) {
                    Ok(lit) => {
                        if wire.is_some() {
                            return syn::Error::new(
                                attr.span(),
                                "duplicate 'kind' specified for this variant",
                            )
                            .to_compile_error()
                            .into();
                        }
                        wire = Some(lit);
                    }
                    Err(err) => return err.to_compile_error().into(),
                }
            } else {
                retained_attrs.push(attr.clone());
            }
        }

        let wire = wire.unwrap_or_else(|| {
            syn::LitStr::new(&to_screaming_snake(&v.ident.to_string()), v.ident.span())
        });

        if !seen_wire.insert(wire.value()) {
            return syn::Error::new(
                wire.span(),
                format!("duplicate event kind '{}'", wire.value()),
            )
            .to_compile_error()
            .into();
        }

        retained_attrs.push(syn::parse_quote!(#[serde(rename = #wire)]));
        v.attrs = retained_attrs;

        defs.push(VariantDef {
            ident: v.ident.clone(),
            payload,
            wire,
        });
    }

    let vis = &enum_item.vis;
    let enum_ident = &enum_item.ident;
    let kind_ident = cfg
        .kind
        .unwrap_or_else(|| format_ident!("{}Kind", enum_ident));
    let kind_doc = format!("`{}` 的事件种类（封闭集合）", enum_ident);

    let v_idents: Vec<&Ident> = defs.iter().map(|s| &s.ident).collect();
    let wires: Vec<&syn::LitStr> = defs.iter().map(|s| &s.wire).collect();

    let payload_impls = defs.iter().map(|s| {
        let v_ident = &s.ident;
        let payload = &s.payload;
        quote! {
            impl ::gastro_events::EventPayload<#enum_ident> for #payload {
                const KIND: #kind_ident = #kind_ident::#v_ident;

                #[allow(unreachable_patterns)]
                fn from_event(event: &#enum_ident) -> ::std::option::Option<&Self> {
                    match event {
                        #enum_ident::#v_ident(payload) => ::std::option::Option::Some(payload),
                        _ => ::std::option::Option::None,
                    }
                }

                fn into_event(self) -> #enum_ident {
                    #enum_ident::#v_ident(self)
                }
            }

            impl ::std::convert::From<#payload> for #enum_ident {
                fn from(payload: #payload) -> Self {
                    Self::#v_ident(payload)
                }
            }
        }
    });

    let out = quote! {
        #enum_item

        #[doc = #kind_doc]
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            serde::Serialize, serde::Deserialize,
        )]
        #vis enum #kind_ident {
            #( #[serde(rename = #wires)] #v_idents, )*
        }

        impl #kind_ident {
            /// 按声明顺序列出全部种类
            pub const ALL: &'static [#kind_ident] = &[ #( #kind_ident::#v_idents ),* ];

            /// 线上名称，例如 `EMPLOYEE_CREATED`
            pub const fn as_str(self) -> &'static str {
                match self {
                    #( #kind_ident::#v_idents => #wires, )*
                }
            }
        }

        impl ::std::fmt::Display for #kind_ident {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for #kind_ident {
            type Err = ::gastro_events::error::EventError;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                match s {
                    #( #wires => ::std::result::Result::Ok(#kind_ident::#v_idents), )*
                    other => ::std::result::Result::Err(
                        ::gastro_events::error::EventError::UnknownKind {
                            kind: other.to_string(),
                        },
                    ),
                }
            }
        }

        impl ::gastro_events::BusEvent for #enum_ident {
            type Kind = #kind_ident;

            fn kind(&self) -> #kind_ident {
                match self {
                    #( #enum_ident::#v_idents(_) => #kind_ident::#v_idents, )*
                }
            }
        }

        #( #payload_impls )*
    };

    TokenStream::from(out)
}

// -------- parsing --------

// 变体级：#[event(kind = "WIRE_NAME")]
fn parse_variant_event_attr(attr: &syn::Attribute) -> Result<syn::LitStr> {
    let mut kind: Option<syn::LitStr> = None;
    attr.parse_nested_meta(|meta| {
        if !meta.path.is_ident("kind") {
            return Err(meta.error("unknown key; expected 'kind'"));
        }
        if kind.is_some() {
            return Err(meta.error("duplicate key 'kind' in attribute"));
        }
        let lit: syn::LitStr = meta.value()?.parse()?;
        if lit.value().trim().is_empty() {
            return Err(syn::Error::new(lit.span(), "'kind' must not be empty"));
        }
        kind = Some(lit);
        Ok(())
    })?;

    kind.ok_or_else(|| syn::Error::new(attr.span(), "expected #[event(kind = \"...\")]"))
}

// 枚举级：#[app_event] 或 #[app_event(kind = KindEnumName)]
#[derive(Default)]
struct AppEventAttrConfig {
    kind: Option<Ident>,
}

impl Parse for AppEventAttrConfig {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut cfg = Self::default();
        let parser = syn::meta::parser(|meta| {
            if !meta.path.is_ident("kind") {
                return Err(meta.error("unknown key; expected 'kind'"));
            }
            if cfg.kind.is_some() {
                return Err(meta.error("duplicate key 'kind' in attribute"));
            }
            cfg.kind = Some(meta.value()?.parse()?);
            Ok(())
        });
        parser.parse2(input.parse()?)?;
        Ok(cfg)
    }
}
