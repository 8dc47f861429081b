//! Procedural macros for empholite-dispatch

use darling::{FromDeriveInput, FromVariant};
use proc_macro::TokenStream;
use proc_macro2::Ident;
use quote::{format_ident, quote};
use std::collections::BTreeMap;
use syn::{parse_macro_input, DeriveInput};

/// Container-level attributes for #[derive(Action)]
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(action), supports(enum_any))]
struct ActionOpts {
    ident: syn::Ident,
    data: darling::ast::Data<ActionVariant, ()>,

    /// Infer categories from variant name prefixes
    #[darling(default)]
    infer_categories: bool,
}

/// Variant-level attributes
#[derive(Debug, FromVariant)]
#[darling(attributes(action))]
struct ActionVariant {
    ident: syn::Ident,
    fields: darling::ast::Fields<()>,

    /// Explicit category override
    #[darling(default)]
    category: Option<String>,

    /// Exclude from category inference
    #[darling(default)]
    skip_category: bool,
}

// Verbs that end the subject part of a variant name. Nouns ("Draft",
// "Detail") must not appear here.
const ACTION_VERBS: &[&str] = &[
    "Fetch", "Check", "Load", "Save", "Create", "Delete", "Submit", "Confirm", "Cancel", "Show",
    "Hide", "Dismiss", "Open", "Close", "Toggle", "Clear", "Update", "Set", "Reset", "Focus",
    "Cycle", "Next", "Prev",
];

/// Marks the start of an async result: `SessionDidLoad`
const RESULT_MARKER: &str = "Did";

fn split_pascal_case(s: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();

    for ch in s.chars() {
        if ch.is_uppercase() && !current.is_empty() {
            parts.push(std::mem::take(&mut current));
        }
        current.push(ch);
    }
    if !current.is_empty() {
        parts.push(current);
    }
    parts
}

fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, ch) in s.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.extend(ch.to_lowercase());
        } else {
            result.push(ch);
        }
    }
    result
}

fn to_pascal_case(s: &str) -> String {
    s.split('_')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            }
        })
        .collect()
}

/// Category of a variant name: the parts before the first verb or `Did`
///
/// `ResponsesFetch` and `ResponsesDidLoad` both give `responses`.
/// Names that start with a verb, or contain none, are uncategorized.
fn infer_category(name: &str) -> Option<String> {
    let parts = split_pascal_case(name);
    if parts.len() < 2 {
        return None;
    }

    let is_boundary = |p: &str| p == RESULT_MARKER || ACTION_VERBS.contains(&p);
    if is_boundary(&parts[0]) {
        return None;
    }

    let prefix_end = parts.iter().skip(1).position(|p| is_boundary(p))? + 1;
    Some(to_snake_case(&parts[..prefix_end].concat()))
}

/// Derive macro for the Action trait
///
/// Generates `name()` returning the variant name.
///
/// With `#[action(infer_categories)]`, also generates:
/// - `{Name}Category` enum with every discovered category
/// - `category()` and `category_enum()`, plus the `ActionCategory` impl
/// - `is_{category}()` predicates
///
/// # Example
/// ```ignore
/// #[derive(Action, Clone, Debug)]
/// #[action(infer_categories)]
/// enum Action {
///     SessionCheck,
///     SessionDidLoad(Snapshot),
///     #[action(category = "dialog")]
///     DialogDraftUpdate(String),
///     Quit, // uncategorized
/// }
///
/// assert_eq!(Action::SessionCheck.name(), "SessionCheck");
/// assert_eq!(Action::SessionCheck.category(), Some("session"));
/// assert!(Action::DialogDraftUpdate(String::new()).is_dialog());
/// ```
#[proc_macro_derive(Action, attributes(action))]
pub fn derive_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let opts = match ActionOpts::from_derive_input(&input) {
        Ok(opts) => opts,
        Err(e) => return e.write_errors().into(),
    };

    let name = &opts.ident;

    let variants = match &opts.data {
        darling::ast::Data::Enum(variants) => variants,
        _ => {
            return syn::Error::new_spanned(&input, "Action can only be derived for enums")
                .to_compile_error()
                .into();
        }
    };

    let name_arms = variants.iter().map(|v| {
        let variant_name = &v.ident;
        let variant_str = variant_name.to_string();

        match &v.fields.style {
            darling::ast::Style::Unit => quote! { #name::#variant_name => #variant_str },
            darling::ast::Style::Tuple => quote! { #name::#variant_name(..) => #variant_str },
            darling::ast::Style::Struct => quote! { #name::#variant_name { .. } => #variant_str },
        }
    });

    let mut expanded = quote! {
        impl empholite_dispatch::Action for #name {
            fn name(&self) -> &'static str {
                match self {
                    #(#name_arms),*
                }
            }
        }
    };

    if opts.infer_categories {
        // BTreeMap keeps the generated enum in a stable order
        let mut categories: BTreeMap<String, Vec<&Ident>> = BTreeMap::new();
        let mut variant_categories: Vec<(&Ident, Option<String>)> = Vec::new();

        for v in variants.iter() {
            let cat = if v.skip_category {
                None
            } else {
                v.category
                    .clone()
                    .or_else(|| infer_category(&v.ident.to_string()))
            };

            if let Some(category) = &cat {
                categories.entry(category.clone()).or_default().push(&v.ident);
            }
            variant_categories.push((&v.ident, cat));
        }

        let category_enum_name = format_ident!("{}Category", name);
        let category_names: Vec<&String> = categories.keys().collect();
        let category_variants: Vec<_> = category_names
            .iter()
            .map(|c| format_ident!("{}", to_pascal_case(c)))
            .collect();

        let category_arms = variant_categories.iter().map(|(variant, cat)| {
            let cat_expr = match cat {
                Some(c) => quote! { ::core::option::Option::Some(#c) },
                None => quote! { ::core::option::Option::None },
            };
            quote! { #name::#variant { .. } => #cat_expr }
        });

        let category_enum_arms = variant_categories.iter().map(|(variant, cat)| {
            let cat_variant = match cat {
                Some(c) => format_ident!("{}", to_pascal_case(c)),
                None => format_ident!("Uncategorized"),
            };
            quote! { #name::#variant { .. } => #category_enum_name::#cat_variant }
        });

        let predicates = categories.iter().map(|(cat, members)| {
            let predicate_name = format_ident!("is_{}", cat);
            let patterns = members.iter().map(|v| quote! { #name::#v { .. } });
            let doc = format!("Returns true if this action belongs to the `{cat}` category.");

            quote! {
                #[doc = #doc]
                pub fn #predicate_name(&self) -> bool {
                    matches!(self, #(#patterns)|*)
                }
            }
        });

        let category_enum_doc = format!("Action categories for [`{name}`].");

        expanded = quote! {
            #expanded

            #[doc = #category_enum_doc]
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
            pub enum #category_enum_name {
                #(#category_variants,)*
                /// Actions without a category.
                Uncategorized,
            }

            impl #category_enum_name {
                /// All category values
                pub fn all() -> &'static [Self] {
                    &[#(Self::#category_variants,)* Self::Uncategorized]
                }

                /// Category name as string
                pub fn name(&self) -> &'static str {
                    match self {
                        #(Self::#category_variants => #category_names,)*
                        Self::Uncategorized => "uncategorized",
                    }
                }
            }

            impl #name {
                /// The action's category, if any
                pub fn category(&self) -> ::core::option::Option<&'static str> {
                    match self {
                        #(#category_arms,)*
                    }
                }

                /// The category as an enum value
                pub fn category_enum(&self) -> #category_enum_name {
                    match self {
                        #(#category_enum_arms,)*
                    }
                }

                #(#predicates)*
            }

            impl empholite_dispatch::ActionCategory for #name {
                type Category = #category_enum_name;

                fn category(&self) -> ::core::option::Option<&'static str> {
                    #name::category(self)
                }

                fn category_enum(&self) -> Self::Category {
                    #name::category_enum(self)
                }
            }
        };
    }

    TokenStream::from(expanded)
}
