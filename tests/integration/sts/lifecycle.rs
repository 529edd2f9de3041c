// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0
//

use eyre::{OptionExt, Report};

use sts_core::config::Config;
use sts_core::provider::Provider;
use sts_core::sts::StsApi;
use sts_core::sts::constants::{STATUS_CODE_INVALID, STATUS_TYPE};
use sts_core::sts::error::WsTrustError;
use sts_core::sts::types::{
    AppliesTo, Principal, RequestSecurityToken, RequestType, Status, TokenElement,
};

use super::{SERVICE, setup};

/// Issue a signed assertion for the service.
fn issued_token(provider: &Provider) -> Result<TokenElement, Report> {
    let request = RequestSecurityToken::builder()
        .applies_to(AppliesTo::endpoint(SERVICE))
        .build()?;
    provider
        .get_sts_provider()
        .handle(&request, &Principal::from("john"))?
        .requested_security_token
        .ok_or_eyre("issued token")
}

fn tampered(mut token: TokenElement) -> TokenElement {
    token
        .attributes
        .insert("Signature".into(), "tampered".into());
    token
}

fn validate_request(token: TokenElement) -> Result<RequestSecurityToken, Report> {
    Ok(RequestSecurityToken::builder()
        .request_type(RequestType::Validate)
        .validate_target(token)
        .build()?)
}

#[test]
fn test_renew() -> Result<(), Report> {
    let (provider, tokens) = setup(Config::default(), true)?;
    let token = issued_token(&provider)?;

    let request = RequestSecurityToken::builder()
        .request_type(RequestType::Renew)
        .renew_target(token.clone())
        .build()?;
    let response = provider
        .get_sts_provider()
        .handle(&request, &Principal::from("john"))?;
    let renewed = response
        .requested_security_token
        .ok_or_eyre("renewed token")?;
    assert_eq!("Assertion", renewed.local_name);
    assert_ne!(token.attributes.get("ID"), renewed.attributes.get("ID"));
    assert!(renewed.attributes.contains_key("Signature"));

    let context = tokens.last_context().ok_or_eyre("renew context")?;
    assert_eq!(Some(token.qname()), context.qname);
    Ok(())
}

#[test]
fn test_renew_tampered() -> Result<(), Report> {
    let (provider, _) = setup(Config::default(), true)?;
    let token = tampered(issued_token(&provider)?);

    let request = RequestSecurityToken::builder()
        .request_type(RequestType::Renew)
        .renew_target(token)
        .build()?;
    match provider
        .get_sts_provider()
        .handle(&request, &Principal::from("john"))
    {
        Err(WsTrustError::Signature(reason)) => {
            assert_eq!("digital signature is invalid", reason);
        }
        other => panic!("tampered token must not be renewed: {other:?}"),
    }

    let request = RequestSecurityToken::builder()
        .request_type(RequestType::Renew)
        .build()?;
    assert!(matches!(
        provider
            .get_sts_provider()
            .handle(&request, &Principal::from("john")),
        Err(WsTrustError::MissingElement("renew target"))
    ));
    Ok(())
}

#[test]
fn test_validate() -> Result<(), Report> {
    let (provider, _) = setup(Config::default(), true)?;
    let token = issued_token(&provider)?;

    let response = provider
        .get_sts_provider()
        .handle(&validate_request(token.clone())?, &Principal::from("john"))?;
    assert_eq!(Some(STATUS_TYPE.into()), response.token_type);
    assert!(response.status.ok_or_eyre("status")?.is_valid());
    assert!(response.requested_security_token.is_none());

    let response = provider
        .get_sts_provider()
        .handle(&validate_request(tampered(token.clone()))?, &Principal::from("john"))?;
    assert_eq!(
        Some(Status::invalid(
            "Validation failure: digital signature is invalid"
        )),
        response.status
    );

    let mut unsigned = token;
    unsigned.attributes.remove("Signature");
    let response = provider
        .get_sts_provider()
        .handle(&validate_request(unsigned)?, &Principal::from("john"))?;
    assert_eq!(
        Some(Status::invalid(
            "Validation failure: unable to verify digital signature: no signature"
        )),
        response.status
    );
    Ok(())
}

#[test]
fn test_validate_unsigned() -> Result<(), Report> {
    let (provider, _) = setup(Config::default(), false)?;

    let unknown = TokenElement::builder()
        .namespace("urn:example:tokens")
        .local_name("Ticket")
        .build()?;
    let response = provider
        .get_sts_provider()
        .handle(&validate_request(unknown)?, &Principal::from("john"))?;
    let status = response.status.ok_or_eyre("status")?;
    assert_eq!(STATUS_CODE_INVALID, status.code);
    assert_eq!("Unknown token", status.reason);

    // signature is not checked without the key pair
    let token = tampered(issued_token(&provider)?);
    let response = provider
        .get_sts_provider()
        .handle(&validate_request(token)?, &Principal::from("john"))?;
    assert!(response.status.ok_or_eyre("status")?.is_valid());
    Ok(())
}

#[test]
fn test_cancel() -> Result<(), Report> {
    let (provider, tokens) = setup(Config::default(), true)?;
    let token = issued_token(&provider)?;

    let request = RequestSecurityToken::builder()
        .context("cancel-1")
        .request_type(RequestType::Cancel)
        .cancel_target(token.clone())
        .build()?;
    let response = provider
        .get_sts_provider()
        .handle(&request, &Principal::from("john"))?;
    assert!(response.requested_token_cancelled);
    assert_eq!(Some("cancel-1".into()), response.context);
    assert!(response.requested_security_token.is_none());

    let context = tokens.last_context().ok_or_eyre("cancel context")?;
    assert_eq!(Some(token.qname()), context.qname);
    Ok(())
}
