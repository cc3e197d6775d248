//! Selection of the address to bind for the network being deployed to

/// Whether `network` is one of `development_chains`.
///
/// Membership is an exact, case-sensitive string match.
pub fn is_development_chain<S: AsRef<str>>(development_chains: &[S], network: &str) -> bool {
    development_chains
        .iter()
        .any(|chain| chain.as_ref() == network)
}

/// Select between a production and a development address for `current_network`.
///
/// Returns `test_address` if `current_network` is one of `development_chains`,
/// and `main_address` otherwise. Networks that appear nowhere in the
/// configuration therefore receive the production address.
///
/// The address type is left generic so that callers can pass the outcome of a
/// lookup (e.g. a `Result`) that only matters when it is the one selected.
pub fn select_address<S: AsRef<str>, A>(
    development_chains: &[S],
    current_network: &str,
    main_address: A,
    test_address: A,
) -> A {
    if is_development_chain(development_chains, current_network) {
        test_address
    } else {
        main_address
    }
}
