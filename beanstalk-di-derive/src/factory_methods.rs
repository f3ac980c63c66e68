use crate::attributes::FactoryMethodsAttributes;
use crate::bean::register_bean_type;
use itertools::Itertools;
use proc_macro2::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{
    Error, FnArg, ImplItem, ImplItemFn, Item, ItemImpl, LitStr, Result, ReturnType, Type,
};

const FACTORY_METHOD: &str = "factory_method";

fn is_factory_method(method: &ImplItemFn) -> bool {
    method
        .attrs
        .iter()
        .any(|attribute| attribute.path().is_ident(FACTORY_METHOD))
}

fn generate_registration(self_ty: &Type, method: &ImplItemFn) -> Result<TokenStream> {
    let signature = &method.sig;
    let ident = &signature.ident;
    let method_name = ident.to_string();

    if !signature.generics.params.is_empty() || signature.asyncness.is_some() {
        return Err(Error::new(
            signature.span(),
            "Factory methods cannot be generic or async!",
        ));
    }

    let return_type = if let ReturnType::Type(_, ty) = &signature.output {
        ty
    } else {
        return Err(Error::new(
            signature.span(),
            "Factory methods must return the created bean!",
        ));
    };

    let (receiver, parameters): (Vec<_>, Vec<_>) = signature
        .inputs
        .iter()
        .partition(|input| matches!(input, FnArg::Receiver(_)));

    if let Some(parameter) = parameters.first() {
        return Err(Error::new(
            parameter.span(),
            "Factory methods cannot take parameters!",
        ));
    }

    let (method_variant, invocation) = match receiver.first() {
        None => (
            quote!(Static),
            quote! {
                fn invoke() -> Result<
                    beanstalk_di::instance_provider::BeanInstanceAnyPtr,
                    beanstalk_di::instance_provider::ErrorPtr,
                > {
                    beanstalk_di::bean::IntoBeanInstance::into_bean_instance(<#self_ty>::#ident())
                        .map(|instance| instance as beanstalk_di::instance_provider::BeanInstanceAnyPtr)
                }
            },
        ),
        Some(FnArg::Receiver(receiver))
            if receiver.reference.is_some() && receiver.mutability.is_none() =>
        {
            (
                quote!(Instance),
                quote! {
                    fn invoke(
                        factory: &beanstalk_di::instance_provider::BeanInstanceAnyPtr,
                    ) -> Result<
                        beanstalk_di::instance_provider::BeanInstanceAnyPtr,
                        beanstalk_di::instance_provider::ErrorPtr,
                    > {
                        let factory = beanstalk_di::catalog::internal::factory_instance::<#self_ty>(factory)?;
                        beanstalk_di::bean::IntoBeanInstance::into_bean_instance(factory.#ident())
                            .map(|instance| instance as beanstalk_di::instance_provider::BeanInstanceAnyPtr)
                    }
                },
            )
        }
        Some(receiver) => {
            return Err(Error::new(
                receiver.span(),
                "Instance factory methods must take &self!",
            ))
        }
    };

    Ok(quote! {
        const _: () = {
            #invocation

            fn register() -> beanstalk_di::catalog::FactoryMethodMetadata {
                type Produced = <#return_type as beanstalk_di::bean::IntoBeanInstance>::Bean;

                beanstalk_di::catalog::FactoryMethodMetadata {
                    owner: std::any::TypeId::of::<#self_ty>(),
                    method_name: #method_name,
                    produces: std::any::TypeId::of::<Produced>(),
                    produces_name: std::any::type_name::<Produced>(),
                    method: beanstalk_di::catalog::FactoryMethod::#method_variant(invoke),
                }
            }

            beanstalk_di::catalog::internal::submit! {
                beanstalk_di::catalog::internal::FactoryMethodRegisterer {
                    register
                }
            };
        };
    })
}

pub fn expand_factory_methods(item: Item, args: &FactoryMethodsAttributes) -> Result<TokenStream> {
    let mut item_impl: ItemImpl = match item {
        Item::Impl(item_impl) => item_impl,
        item => {
            return Err(Error::new(
                item.span(),
                "Factory methods can only be registered on impl blocks!",
            ))
        }
    };

    if item_impl.trait_.is_some() || !item_impl.generics.params.is_empty() {
        return Err(Error::new(
            item_impl.span(),
            "Factory methods can only be registered on non-generic inherent impl blocks!",
        ));
    }

    let name = if let Type::Path(path) = item_impl.self_ty.as_ref() {
        path.path
            .segments
            .last()
            .map(|segment| segment.ident.to_string())
            .ok_or_else(|| Error::new(path.span(), "Missing type name!"))?
    } else {
        return Err(Error::new(
            item_impl.self_ty.span(),
            "Factory methods can only be registered for named types!",
        ));
    };

    let registrations: Vec<_> = item_impl
        .items
        .iter()
        .filter_map(|item| match item {
            ImplItem::Fn(method) if is_factory_method(method) => {
                Some(generate_registration(&item_impl.self_ty, method))
            }
            _ => None,
        })
        .try_collect()?;

    for item in &mut item_impl.items {
        if let ImplItem::Fn(method) = item {
            method
                .attrs
                .retain(|attribute| !attribute.path().is_ident(FACTORY_METHOD));
        }
    }

    let name = args.name.as_ref().map(LitStr::value).unwrap_or(name);
    let type_registration = register_bean_type(&item_impl.self_ty, name, false);

    Ok(quote! {
        #item_impl

        #type_registration

        #(#registrations)*
    })
}
