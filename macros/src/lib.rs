use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, spanned::Spanned, ItemFn};

/// Marks a synchronous rxkit test.
///
/// Expands to a plain `#[test]` whose body first installs a
/// `tracing-subscriber` test writer (filtered by `RUST_LOG`), so the crate's
/// trace output shows up next to a failing assertion. Installing twice is
/// harmless: later attempts are ignored.
#[proc_macro_attribute]
pub fn test(attr: TokenStream, item: TokenStream) -> TokenStream {
  let mut input = parse_macro_input!(item as ItemFn);

  let raw_args = proc_macro2::TokenStream::from(attr);
  if !raw_args.is_empty() {
    return TokenStream::from(
      syn::Error::new(raw_args.span(), "rxkit_macro::test does not take arguments")
        .to_compile_error(),
    );
  }

  if let Some(asyncness) = input.sig.asyncness {
    return TokenStream::from(
      syn::Error::new(
        asyncness.span(),
        "rxkit_macro::test only supports synchronous tests: rxkit delivers every event on the \
         calling thread",
      )
      .to_compile_error(),
    );
  }

  input.block.stmts.insert(
    0,
    syn::parse_quote! {
      let _ = ::tracing_subscriber::fmt()
        .with_env_filter(::tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
    },
  );

  let expanded = quote! {
      #[test]
      #input
  };

  TokenStream::from(expanded)
}
