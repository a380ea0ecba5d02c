//! Compile-time-checked test literals. An invalid literal is a compile
//! error, so tests can never drift out of sync with the syntax rules.

use proc_macro::TokenStream;
use quote::quote;
use syn::{LitStr, parse_macro_input};

#[proc_macro]
pub fn username(input: TokenStream) -> TokenStream {
    let lit_str = parse_macro_input!(input as LitStr);
    let value = lit_str.value();

    if let Err(violations) = validation::validate_username(&value) {
        return syn::Error::new(lit_str.span(), violations.join(" :: "))
            .to_compile_error()
            .into();
    }

    quote! { #value }.into()
}

#[proc_macro]
pub fn account_id(input: TokenStream) -> TokenStream {
    let lit_str = parse_macro_input!(input as LitStr);
    let value = lit_str.value();

    match uuid::Uuid::parse_str(&value) {
        Err(err) => {
            return syn::Error::new(lit_str.span(), err.to_string())
                .to_compile_error()
                .into();
        }
        Ok(uuid) if uuid.is_nil() => {
            return syn::Error::new(lit_str.span(), "account id is required")
                .to_compile_error()
                .into();
        }
        Ok(_) => {}
    }

    quote! { #value }.into()
}
