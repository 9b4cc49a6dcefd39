use syn::{Data, DeriveInput, Fields, LitInt, LitStr};
use proc_macro::TokenStream;
use quote::quote;

const MAX_TRAITS: u32 = 64;

pub fn impl_trait(ast: &DeriveInput) -> syn::Result<TokenStream> {
	let name = &ast.ident;

	let mut index = None;
	let mut trait_name = name.to_string();
	for attr in &ast.attrs {
		if attr.path.is_ident("trait_index") {
			let lit: LitInt = attr.parse_args()?;
			let value: u32 = lit.base10_parse()?;
			if value >= MAX_TRAITS {
				return Err(syn::Error::new_spanned(lit, "trait_index must be below 64"));
			}
			index = Some(value);
		} else if attr.path.is_ident("trait_name") {
			let lit: LitStr = attr.parse_args()?;
			trait_name = lit.value();
		}
	}

	let index = match index {
		Some(index) => index,
		None => {
			return Err(syn::Error::new_spanned(
				name,
				"#[derive(Trait)] requires a #[trait_index(N)] attribute",
			))
		},
	};

	let has_owner = match &ast.data {
		Data::Struct(data) => match &data.fields {
			Fields::Named(fields) => {
				fields.named.iter().any(|f| f.ident.as_ref().map_or(false, |i| i == "object"))
			},
			_ => false,
		},
		_ => false,
	};

	if !has_owner {
		return Err(syn::Error::new_spanned(
			name,
			"#[derive(Trait)] requires a named `object: ObjectId` field",
		));
	}

	let gen = quote! {
		impl prototype_traits::traits::Trait for #name {
			const INDEX: u32 = #index;
			const NAME: &'static str = #trait_name;

			#[inline(always)]
			fn object(&self) -> prototype_traits::objects::ObjectId {
				self.object
			}

			#[inline(always)]
			fn set_object(&mut self, object: prototype_traits::objects::ObjectId) {
				self.object = object;
			}
		}
	};
	Ok(gen.into())
}
