use crate::attributes::{BeanAttributes, DefaultDefinition, FieldAttributes};
use itertools::Itertools;
use proc_macro2::TokenStream;
use quote::{quote, ToTokens};
use syn::spanned::Spanned;
use syn::{
    Attribute, Data, DataStruct, DeriveInput, Error, Field, Fields, FieldsNamed, FieldsUnnamed,
    LitStr, Result,
};

const BEAN: &str = "bean";

/// Tracks the index of the next constructor argument to consume.
#[derive(Default)]
struct ArgumentCursor(usize);

impl ArgumentCursor {
    fn generate_construction(&mut self, field: &Field) -> Result<TokenStream> {
        for attr in &field.attrs {
            if attr.path().is_ident(BEAN) {
                let attributes = FieldAttributes::try_from(attr)?;
                match &attributes.default {
                    Some(DefaultDefinition::Expr(path)) => return Ok(quote!(#path())),
                    Some(DefaultDefinition::Default) => {
                        return Ok(quote!(std::default::Default::default()))
                    }
                    _ => {}
                }
            }
        }

        let ty = &field.ty;
        let index = self.0;
        self.0 += 1;

        Ok(quote! {
            arguments.resolve::<#ty>(#index, instance_provider)?
        })
    }

    fn make_named_struct(&mut self, fields: &FieldsNamed) -> Result<TokenStream> {
        let fields: Vec<_> = fields
            .named
            .iter()
            .map(|field| -> Result<TokenStream> {
                let ident = field
                    .ident
                    .as_ref()
                    .ok_or_else(|| Error::new(field.span(), "Missing field name!"))?;
                let instance = self.generate_construction(field)?;
                Ok(quote! {
                    #ident: #instance
                })
            })
            .try_collect()?;

        Ok(quote! {
            Self {
                #(#fields),*
            }
        })
    }

    fn make_unnamed_struct(&mut self, fields: &FieldsUnnamed) -> Result<TokenStream> {
        let fields: Vec<_> = fields
            .unnamed
            .iter()
            .map(|field| self.generate_construction(field))
            .try_collect()?;

        Ok(quote! {
            Self(#(#fields),*)
        })
    }
}

fn extract_bean_attributes(attributes: &[Attribute]) -> Result<BeanAttributes> {
    attributes
        .iter()
        .filter(|attribute| attribute.path().is_ident(BEAN))
        .map(BeanAttributes::try_from)
        .next()
        .transpose()
        .map(Option::unwrap_or_default)
}

/// Generates static registration of a type in the bean type catalog.
pub fn register_bean_type<T: ToTokens>(
    ty: &T,
    name: String,
    with_constructor: bool,
) -> TokenStream {
    let constructor = if with_constructor {
        quote!(Some(beanstalk_di::bean::constructor_of::<#ty>()))
    } else {
        quote!(None)
    };

    quote! {
        const _: () = {
            fn register() -> beanstalk_di::catalog::BeanTypeMetadata {
                beanstalk_di::catalog::BeanTypeMetadata {
                    name: #name,
                    type_id: std::any::TypeId::of::<#ty>(),
                    type_name: std::any::type_name::<#ty>(),
                    constructor: #constructor,
                }
            }

            beanstalk_di::catalog::internal::submit! {
                beanstalk_di::catalog::internal::BeanTypeRegisterer {
                    register
                }
            };
        };
    }
}

pub fn expand_bean(input: &DeriveInput) -> Result<TokenStream> {
    if let Data::Struct(DataStruct { fields, .. }) = &input.data {
        if !input.generics.params.is_empty() {
            return Err(Error::new(
                input.generics.span(),
                "Generic beans are not supported!",
            ));
        }

        let ident = &input.ident;
        let attributes = extract_bean_attributes(&input.attrs)?;

        let generation = if let Some(constructor) = &attributes.constructor {
            quote! {
                #constructor(arguments, instance_provider)
            }
        } else {
            let mut cursor = ArgumentCursor::default();
            let construction = match fields {
                Fields::Named(fields) => cursor.make_named_struct(fields)?,
                Fields::Unnamed(fields) => cursor.make_unnamed_struct(fields)?,
                Fields::Unit => quote! { Self },
            };

            quote! {
                Ok(#construction)
            }
        };

        let name = attributes
            .name
            .as_ref()
            .map(LitStr::value)
            .unwrap_or_else(|| ident.to_string());
        let registration = register_bean_type(ident, name, true);

        Ok(quote! {
            #[automatically_derived]
            impl beanstalk_di::bean::Bean for #ident {
                #[allow(unused_variables)]
                fn create(
                    arguments: &beanstalk_di::arguments::BeanArguments,
                    instance_provider: &mut dyn beanstalk_di::instance_provider::BeanInstanceProvider,
                ) -> Result<Self, beanstalk_di::instance_provider::ErrorPtr> {
                    #generation
                }
            }

            #registration
        })
    } else {
        Err(Error::new(input.span(), "Can only derive Bean on structs!"))
    }
}
