mod attachable;

use proc_macro::TokenStream;
use syn::DeriveInput;

/// Implements `prototype_traits::traits::Trait` for a payload struct.
///
/// The struct must carry a `#[trait_index(N)]` attribute (`N < 64`) and a named
/// `object: ObjectId` field holding its owner. `#[trait_name("...")]` overrides
/// the registered name, which defaults to the struct identifier.
#[proc_macro_derive(Trait, attributes(trait_index, trait_name))]
pub fn derive_trait(input: TokenStream) -> TokenStream {
	let ast: DeriveInput = syn::parse(input).unwrap();
	match attachable::impl_trait(&ast) {
		Ok(tokens) => tokens,
		Err(error) => error.to_compile_error().into(),
	}
}
