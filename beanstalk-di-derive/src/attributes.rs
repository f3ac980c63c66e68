use syn::parse::{Parse, ParseStream};
use syn::{Attribute, Error, ExprPath, LitStr, Token};

pub enum DefaultDefinition {
    Default,
    Expr(ExprPath),
}

pub struct FieldAttributes {
    pub default: Option<DefaultDefinition>,
}

impl TryFrom<&Attribute> for FieldAttributes {
    type Error = Error;

    fn try_from(value: &Attribute) -> Result<Self, Self::Error> {
        let mut default = None;
        value.parse_nested_meta(|meta| {
            if meta.path.is_ident("default") {
                if meta.input.peek(Token![=]) {
                    let value = meta.value()?;
                    let expr: LitStr = value.parse()?;
                    default = Some(DefaultDefinition::Expr(expr.parse()?));
                } else {
                    default = Some(DefaultDefinition::Default);
                }

                Ok(())
            } else {
                Err(meta.error("Unsupported field attribute!"))
            }
        })?;

        Ok(Self { default })
    }
}

#[derive(Default)]
pub struct BeanAttributes {
    pub name: Option<LitStr>,
    pub constructor: Option<ExprPath>,
}

impl TryFrom<&Attribute> for BeanAttributes {
    type Error = Error;

    fn try_from(value: &Attribute) -> Result<Self, Self::Error> {
        let mut result = Self::default();
        value.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                result.name = Some(meta.value().and_then(|value| value.parse())?);
            } else if meta.path.is_ident("constructor") {
                let expr: LitStr = meta.value().and_then(|value| value.parse())?;
                result.constructor = Some(expr.parse()?);
            } else {
                return Err(meta.error("Unsupported bean attribute!"));
            }

            Ok(())
        })?;

        Ok(result)
    }
}

#[derive(Default)]
pub struct FactoryMethodsAttributes {
    pub name: Option<LitStr>,
}

impl Parse for FactoryMethodsAttributes {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut result = Self::default();
        while !input.is_empty() {
            let lookahead = input.lookahead1();
            if lookahead.peek(kw::name) {
                if result.name.is_some() {
                    return Err(Error::new(input.span(), "Name is already defined!"));
                }

                result.name = Some(input.parse::<LitArg<kw::name, LitStr>>()?.value);
            } else if lookahead.peek(Token![,]) {
                let _ = input.parse::<Token![,]>()?;
            } else {
                return Err(lookahead.error());
            }
        }

        Ok(result)
    }
}

struct LitArg<T, A> {
    value: A,
    _p: std::marker::PhantomData<T>,
}

impl<T: Parse, A: Parse> Parse for LitArg<T, A> {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let _ = input.parse::<T>()?;
        let _ = input.parse::<Token![=]>()?;
        let value = input.parse()?;
        Ok(Self {
            value,
            _p: std::marker::PhantomData,
        })
    }
}

mod kw {
    use syn::custom_keyword;

    custom_keyword!(name);
}
