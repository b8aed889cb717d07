use ethers::types::{Address, Bytes};
use vireo_primitives::{
    constants::entry_point, PaymasterMode, PaymasterServiceData, UserOperationPartial,
    UserOperationSigned,
};
use vireo_rpc::{
    mock::{MockServices, MockState, REJECTED_CODE},
    Bundler, Paymaster, RpcError,
};

fn entry_point() -> Address {
    entry_point::ADDRESS.parse().unwrap()
}

fn user_operation() -> UserOperationSigned {
    UserOperationSigned::default()
        .sender("0x9c5754De1443984659E1b3a8d1931D83475ba29C".parse().unwrap())
        .nonce(0.into())
        .call_data("0x0000189a".parse().unwrap())
        .call_gas_limit(33_100.into())
        .verification_gas_limit(100_000.into())
        .pre_verification_gas(48_588.into())
        .max_fee_per_gas(1_695_000_030u64.into())
        .max_priority_fee_per_gas(1_695_000_000u64.into())
        .signature("0x1234".parse().unwrap())
}

#[tokio::test]
async fn bundler_chain_and_entry_points() -> eyre::Result<()> {
    let mock = MockServices::default();
    let (url, _handle) = mock.start().await?;

    let bundler = Bundler::new(&url, entry_point(), 80001)?;
    assert_eq!(bundler.remote_chain_id().await?, 80001);
    assert_eq!(bundler.supported_entry_points().await?, vec![entry_point()]);
    bundler.check_entry_point_supported().await?;

    let other: Address = "0x0576a174D229E3cFA37253523E645A78A0C91B57".parse()?;
    let bundler = Bundler::new(&url, other, 80001)?;
    assert!(matches!(
        bundler.check_entry_point_supported().await,
        Err(RpcError::UnsupportedEntryPoint(ep)) if ep == other
    ));

    Ok(())
}

#[tokio::test]
async fn bundler_estimates_and_sends() -> eyre::Result<()> {
    let mock = MockServices::default();
    let (url, _handle) = mock.start().await?;
    let bundler = Bundler::new(&url, entry_point(), 80001)?;

    let uo = user_operation();
    let estimation = bundler.estimate_user_op_gas(&uo.clone().into()).await?;
    assert_eq!(estimation, mock.state().gas_estimation);
    assert_eq!(mock.state().estimated.len(), 1);

    let fees = bundler.get_gas_fee_values().await?;
    assert_eq!(fees, mock.state().gas_fee_values);

    let uo_hash = bundler.send_user_op(&uo).await?;
    assert_eq!(uo_hash, uo.hash(&entry_point(), 80001));

    let by_hash = bundler.get_user_op_by_hash(&uo_hash).await?.expect("user operation known");
    assert_eq!(by_hash.user_operation, uo);
    assert_eq!(by_hash.entry_point, entry_point());
    assert_eq!(mock.state().sent[0].hash, uo_hash);
    assert_eq!(mock.state().sent[0].sender, uo.sender);

    let receipt = bundler.get_user_op_receipt(&uo_hash).await?.expect("receipt available");
    assert!(receipt.success);
    assert_eq!(receipt.sender, uo.sender);
    assert_eq!(receipt.user_operation_hash, uo_hash);

    Ok(())
}

#[tokio::test]
async fn receipt_is_null_until_included() -> eyre::Result<()> {
    let mock = MockServices::new(MockState { pending_receipt_polls: 2, ..Default::default() });
    let (url, _handle) = mock.start().await?;
    let bundler = Bundler::new(&url, entry_point(), 80001)?;

    let uo_hash = bundler.send_user_op(&user_operation()).await?;
    assert!(bundler.get_user_op_receipt(&uo_hash).await?.is_none());
    assert!(bundler.get_user_op_receipt(&uo_hash).await?.is_none());
    assert!(bundler.get_user_op_receipt(&uo_hash).await?.is_some());

    Ok(())
}

#[tokio::test]
async fn bundler_rejection_keeps_error_code() -> eyre::Result<()> {
    let mock = MockServices::new(MockState {
        reject_send: Some("AA21 didn't pay prefund".into()),
        ..Default::default()
    });
    let (url, _handle) = mock.start().await?;
    let bundler = Bundler::new(&url, entry_point(), 80001)?;

    let err = bundler.send_user_op(&user_operation()).await.unwrap_err();
    assert_eq!(err.code(), Some(REJECTED_CODE));
    assert!(err.to_string().contains("eth_sendUserOperation"));
    assert!(err.to_string().contains("AA21"));
    assert!(mock.state().sent.is_empty());

    Ok(())
}

#[tokio::test]
async fn paymaster_sponsors_with_gas_limits() -> eyre::Result<()> {
    let mock = MockServices::default();
    let (url, _handle) = mock.start().await?;
    let paymaster = Paymaster::new(&url)?;

    let mut uo = UserOperationPartial::from(user_operation());
    uo.call_gas_limit = None;
    uo.verification_gas_limit = None;
    uo.pre_verification_gas = None;

    let response = paymaster.get_paymaster_and_data(&uo, &PaymasterServiceData::sponsored()).await?;
    assert_eq!(response, mock.state().paymaster_response);

    let (received, data) = mock.state().sponsored[0].clone();
    assert_eq!(received, uo);
    assert_eq!(data.mode, PaymasterMode::Sponsored);
    assert_eq!(data.calculate_gas_limits, Some(true));
    assert_eq!(data.sponsorship_info.unwrap().smart_account_info.name, "BICONOMY");

    Ok(())
}

#[tokio::test]
async fn paymaster_without_gas_limit_calculation() -> eyre::Result<()> {
    let mock = MockServices::default();
    let (url, _handle) = mock.start().await?;
    let paymaster = Paymaster::new(&url)?;

    let service_data =
        PaymasterServiceData { calculate_gas_limits: false, ..PaymasterServiceData::sponsored() };
    let response =
        paymaster.get_paymaster_and_data(&user_operation().into(), &service_data).await?;
    assert!(response.call_gas_limit.is_none());
    assert!(!response.paymaster_and_data.is_empty());

    Ok(())
}

#[tokio::test]
async fn paymaster_requires_signature() -> eyre::Result<()> {
    let mock = MockServices::default();
    let (url, _handle) = mock.start().await?;
    let paymaster = Paymaster::new(&url)?;

    let uo = UserOperationPartial::from(user_operation().signature(Bytes::default()));
    let err =
        paymaster.get_paymaster_and_data(&uo, &PaymasterServiceData::sponsored()).await.unwrap_err();
    assert_eq!(err.code(), Some(REJECTED_CODE));

    Ok(())
}

#[test]
fn invalid_endpoint() {
    assert!(matches!(
        Bundler::new("not a url", entry_point(), 80001),
        Err(RpcError::InvalidEndpoint { .. })
    ));
    assert!(matches!(Paymaster::new("ftp://nope"), Err(RpcError::InvalidEndpoint { .. })));
}
