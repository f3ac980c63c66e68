mod attributes;
mod bean;
mod factory_methods;

use crate::attributes::FactoryMethodsAttributes;
use crate::bean::expand_bean;
use crate::factory_methods::expand_factory_methods;
use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput, Error, Item};

#[proc_macro_derive(Bean, attributes(bean))]
pub fn generate_bean(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_bean(&input)
        .unwrap_or_else(Error::into_compile_error)
        .into()
}

/// Registers methods marked with `#[factory_method]` as static or instance factory methods of the
/// implementing type. Accepts an optional `name = "..."` argument with the type name used in
/// declarative configuration.
#[proc_macro_attribute]
pub fn factory_methods(args: TokenStream, input: TokenStream) -> TokenStream {
    let args = parse_macro_input!(args as FactoryMethodsAttributes);
    let item = parse_macro_input!(input as Item);
    expand_factory_methods(item, &args)
        .unwrap_or_else(Error::into_compile_error)
        .into()
}
