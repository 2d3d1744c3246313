// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Devnet bootstrap: Google provider setup and an account factory.

use alloy::primitives::{bytes, Address, Bytes};
use alloy::sol_types::SolValue;
use tracing::info;

use crate::chain::{Call, Chain, ChainError, Transaction};

/// Provider name the seeded registry is registered under.
pub const GOOGLE_PROVIDER: &str = "Google";

/// Google OIDC signing key ids seeded into the registry.
pub const GOOGLE_KEY_IDS: [&str; 2] = [
    "3db3ed6b9574ee3fcd9f149e59ff0eef4f932153",
    "8a63fe71e53067524cbbc6a3a58463b3864c0787",
];

/// RSA moduli matching [`GOOGLE_KEY_IDS`].
pub fn google_moduli() -> [Bytes; 2] {
    [
        bytes!("d8a729bf80b14e8782284217ce786a3e0db53210803fd0e75f9b36fd4759d5bcce56147caa2a24fcff23ef2f1817633625cf2bd9bb5f0a02461658db92db557385ef9de3de3d3fa119ff4f7a423545487bca4e8f786d240899e6716620617c572fc3f44c33479379964f80e5c8dd8209c968c067d154b25b7b5a82d4d0764573f2723d117c3369229e4758c67cc0f8c8f309eb5796a9a102bfb02cf83f40b2b0002c91205d8524781f3ecbea69e17b257a34cc73dc1ae1d43aa5c21e89fa2a21d917b382e1bcd3b93133562a494cb632f505322f83362fc6d0bb5212512697863fa2d564f4443270aa98a8385a6b545aaa915bdb516d275c3ff1d540389ef7fb"),
        bytes!("c9b3cb7ce8a86e462a3c97f64bdf1390fd1876fcf24aa3d200d6b5470f1012d4f6231ab67eed4314e9fdf2b7b5aa3627e4740f956e87be7fffc3d26694677e98a83f5c9bef11af354e6fad3fdb53ae07e5022ce36d31df5fdfa7f4d16529aff56e52781ca627d6f9219b08423e6bb25de6fbb07641227bef8e5e25695077555c2282a82b799045eb96a874c715908ab307ee95cbf58a791a8047eb0d7097fcb1d48dbce4b03cf43f830dcc437f1289e9b155591f9e7e805a2721b8423ded2dbae08bb380d245e538a9a533e3ce326ffaac62b110ea326bda7a48b53c27bc098f4429027105664ecba5a56ddcb5826cce78bb171152f922c1722c65fa4ead7699"),
    ]
}

/// Addresses of the seeded contracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deployment {
    pub provider_directory: Address,
    pub google_registry: Address,
    pub account_factory: Address,
}

/// Deploy a provider directory, a Google key registry holding Google's
/// signing keys, and an account factory, all owned by `operator`.
///
/// Each step is a regular transaction from `operator`, so the operator
/// nonce advances by five. `operator` must be a genesis dev account.
pub fn bootstrap(chain: &mut Chain, operator: Address) -> Result<Deployment, ChainError> {
    let provider_directory = create(chain, operator, Call::CreateProviderDirectory)?;
    let google_registry = create(chain, operator, Call::CreateKeyRegistry)?;

    let key_ids: Vec<String> = GOOGLE_KEY_IDS.iter().map(|k| k.to_string()).collect();
    let encoded = (key_ids, google_moduli().to_vec()).abi_encode_params();
    send(
        chain,
        operator,
        Some(google_registry),
        Call::AddKeysEncoded {
            data: encoded.into(),
        },
    )?;
    send(
        chain,
        operator,
        Some(provider_directory),
        Call::AddProvider {
            name: GOOGLE_PROVIDER.to_string(),
            registry: google_registry,
        },
    )?;

    let account_factory = create(
        chain,
        operator,
        Call::CreateAccountFactory {
            account_code_hash: None,
            scheme: None,
        },
    )?;

    let deployment = Deployment {
        provider_directory,
        google_registry,
        account_factory,
    };
    info!(
        %provider_directory,
        %google_registry,
        %account_factory,
        "Provider setup deployed"
    );
    Ok(deployment)
}

fn send(
    chain: &mut Chain,
    from: Address,
    to: Option<Address>,
    call: Call,
) -> Result<Option<Address>, ChainError> {
    let nonce = chain.nonce(from);
    let receipt = chain.submit(Transaction::call(from, to, nonce, call))?;
    Ok(receipt.contract_address)
}

fn create(chain: &mut Chain, from: Address, call: Call) -> Result<Address, ChainError> {
    send(chain, from, None, call)?.ok_or(ChainError::MissingRecipient)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::AddressScheme;
    use crate::config::DEFAULT_OPERATOR;
    use alloy::primitives::U256;

    #[test]
    fn bootstrap_registers_google_keys() {
        let mut chain =
            Chain::new(270, AddressScheme::Evm).with_genesis([(DEFAULT_OPERATOR, U256::ZERO)]);
        let deployment = bootstrap(&mut chain, DEFAULT_OPERATOR).unwrap();

        let state = chain.state();
        let directory = state.directory(deployment.provider_directory).unwrap();
        assert_eq!(
            directory.resolve(GOOGLE_PROVIDER).unwrap(),
            deployment.google_registry
        );

        let registry = state.key_registry(deployment.google_registry).unwrap();
        let moduli = google_moduli();
        for (key_id, modulus) in GOOGLE_KEY_IDS.iter().zip(moduli.iter()) {
            let key = registry.active_key(key_id).unwrap();
            assert_eq!(&key.modulus, modulus);
            assert_eq!(key.modulus.len(), 256);
        }

        assert!(state.factory(deployment.account_factory).is_ok());
        assert_eq!(chain.nonce(DEFAULT_OPERATOR), 5);
    }

    #[test]
    fn bootstrap_twice_gives_a_second_setup() {
        let mut chain =
            Chain::new(270, AddressScheme::ZkSync).with_genesis([(DEFAULT_OPERATOR, U256::ZERO)]);
        let first = bootstrap(&mut chain, DEFAULT_OPERATOR).unwrap();
        let second = bootstrap(&mut chain, DEFAULT_OPERATOR).unwrap();
        assert_ne!(first.provider_directory, second.provider_directory);
        assert_eq!(
            chain.state().factory(second.account_factory).unwrap().scheme(),
            AddressScheme::ZkSync
        );
    }
}
