//! End-to-end flows through the controller against the null ledger:
//! form → builder → gateway → ledger client → store.

use collabsplit_app::{AppError, RequestKey, SplitController};
use collabsplit_builder::{BuildError, SplitForm, SplitRequest};
use collabsplit_gateway::{
    Argument, CallArg, Command, Deployment, LedgerError, LedgerGateway, TransactionBlock,
    DEFAULT_PACKAGE_ID,
};
use collabsplit_nullables::NullLedgerClient;
use collabsplit_types::{Address, Member, MemberUpdate, Mist, ObjectId};
use serde_json::json;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn controller(client: NullLedgerClient) -> SplitController<NullLedgerClient> {
    SplitController::new(LedgerGateway::new(client, Deployment::default()))
}

fn signer() -> Address {
    Address::new("0xcreator").unwrap()
}

fn split_id() -> ObjectId {
    ObjectId::new("0x5p1it").unwrap()
}

fn three_way_form() -> SplitForm {
    SplitForm::from_members(vec![
        Member::new("A", 40.0),
        Member::new("B", 30.0),
        Member::new("C", 30.0),
    ])
}

fn pure_input(tx: &TransactionBlock, arg: Argument) -> serde_json::Value {
    match tx.input(arg) {
        Some(CallArg::Pure { value }) => value.clone(),
        other => panic!("expected pure input, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Creation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn three_member_split_is_created_with_exact_arguments() {
    let client = NullLedgerClient::new();
    let controller = controller(client.clone());
    let mut form = three_way_form();
    assert!(form.validate());

    let receipt = controller.submit_form(&mut form, &signer()).await.unwrap();
    assert!(receipt.digest().is_some());

    let executed = client.executed();
    assert_eq!(executed.len(), 1);
    assert_eq!(executed[0].signer, signer());

    let tx = &executed[0].transaction_block;
    let calls: Vec<_> = tx.move_calls().collect();
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0].target.to_string(),
        format!("{DEFAULT_PACKAGE_ID}::split::create_split")
    );
    assert_eq!(calls[0].arguments.len(), 2);
    assert_eq!(pure_input(tx, calls[0].arguments[0]), json!(["A", "B", "C"]));
    assert_eq!(pure_input(tx, calls[0].arguments[1]), json!([4000, 3000, 3000]));

    let store = controller.snapshot();
    assert!(!store.is_loading());
    assert!(store.error().is_none());
}

#[tokio::test]
async fn invalid_total_never_reaches_the_ledger() {
    let client = NullLedgerClient::new();
    let controller = controller(client.clone());
    let mut form = three_way_form();
    form.update_member(2, MemberUpdate::Percentage(29.0));

    let err = controller.submit_form(&mut form, &signer()).await.unwrap_err();

    assert_eq!(
        err,
        AppError::Build(BuildError::InvalidPercentageTotal { total: 99.0 })
    );
    assert!(client.executed().is_empty());
    assert!(form.error().is_some());
    assert_eq!(controller.snapshot().error(), Some(err.to_string().as_str()));
}

#[tokio::test]
async fn empty_form_is_rejected() {
    let client = NullLedgerClient::new();
    let controller = controller(client.clone());
    let mut form = SplitForm::new();

    assert!(controller.submit_form(&mut form, &signer()).await.is_err());
    assert!(client.executed().is_empty());
}

#[tokio::test]
async fn ledger_failure_is_stored_unchanged() {
    let client = NullLedgerClient::new();
    let controller = controller(client.clone());
    let ledger_err = LedgerError::Rpc {
        code: -32000,
        message: "MoveAbort in split::create_split".into(),
    };
    client.fail_next(ledger_err.clone());

    let err = controller
        .submit_form(&mut three_way_form(), &signer())
        .await
        .unwrap_err();

    assert_eq!(err, AppError::Ledger(ledger_err.clone()));
    assert_eq!(
        controller.snapshot().error(),
        Some(ledger_err.to_string().as_str())
    );
    assert_eq!(client.executed().len(), 1);
}

// ---------------------------------------------------------------------------
// In-flight tracking
// ---------------------------------------------------------------------------

#[tokio::test]
async fn duplicate_create_is_refused_while_in_flight() {
    let (client, gate) = NullLedgerClient::gated();
    let controller = controller(client.clone());
    let request = SplitRequest::from_members(three_way_form().members()).unwrap();

    let first_signer = signer();
    let first = controller.create_split(&request, &first_signer);
    let second = async {
        client.wait_for_submissions(1).await;
        assert!(controller.snapshot().is_loading());

        let dup = controller.create_split(&request, &signer()).await;
        assert!(matches!(dup, Err(AppError::AlreadyInFlight { .. })));
        assert_eq!(client.executed().len(), 1);

        gate.release(1);
    };
    let (first, ()) = tokio::join!(first, second);

    assert!(first.is_ok());
    assert!(!controller.snapshot().is_loading());

    // Once settled, the same request may be submitted again.
    gate.release(1);
    assert!(controller.create_split(&request, &signer()).await.is_ok());
    assert_eq!(client.executed().len(), 2);
}

#[tokio::test]
async fn different_splits_may_be_in_flight_together() {
    let (client, gate) = NullLedgerClient::gated();
    let controller = controller(client.clone());
    let other = ObjectId::new("0xother").unwrap();

    let a_id = split_id();
    let a_signer = signer();
    let b_signer = signer();
    let a = controller.distribute(&a_id, &a_signer);
    let b = controller.distribute(&other, &b_signer);
    let release = async {
        client.wait_for_submissions(2).await;
        gate.release(2);
    };
    let (a, b, ()) = tokio::join!(a, b, release);

    assert!(a.is_ok());
    assert!(b.is_ok());
}

#[tokio::test]
async fn cancelled_submission_releases_its_key() {
    let (client, gate) = NullLedgerClient::gated();
    let controller = controller(client.clone());
    let key = RequestKey::Deposit {
        split_id: split_id(),
    };

    let deposit_id = split_id();
    let deposit_signer = signer();
    let deposit = controller.deposit(&deposit_id, Mist::new(10), &deposit_signer);
    let cancel = async {
        client.wait_for_submissions(1).await;
        assert!(controller.tracker().cancel(&key));
    };
    let (result, ()) = tokio::join!(deposit, cancel);

    assert_eq!(result, Err(AppError::Cancelled { key: key.clone() }));
    assert!(!controller.tracker().is_in_flight(&key));
    let store = controller.snapshot();
    assert!(!store.is_loading());
    assert!(store.error().unwrap().contains("cancelled"));

    gate.release(1);
    assert!(controller
        .deposit(&split_id(), Mist::new(10), &signer())
        .await
        .is_ok());
}

#[tokio::test]
async fn cancel_all_resolves_every_pending_request() {
    let (client, _gate) = NullLedgerClient::gated();
    let controller = controller(client.clone());

    let deposit_id = split_id();
    let deposit_signer = signer();
    let distribute_id = split_id();
    let distribute_signer = signer();
    let deposit = controller.deposit(&deposit_id, Mist::new(10), &deposit_signer);
    let distribute = controller.distribute(&distribute_id, &distribute_signer);
    let cancel = async {
        client.wait_for_submissions(2).await;
        assert_eq!(controller.tracker().in_flight_count(), 2);
        controller.tracker().cancel_all();
    };
    let (deposit, distribute, ()) = tokio::join!(deposit, distribute, cancel);

    assert!(matches!(deposit, Err(AppError::Cancelled { .. })));
    assert!(matches!(distribute, Err(AppError::Cancelled { .. })));
    assert_eq!(controller.tracker().in_flight_count(), 0);
    assert!(!controller.snapshot().is_loading());
}

// ---------------------------------------------------------------------------
// Deposit / distribute
// ---------------------------------------------------------------------------

#[tokio::test]
async fn deposit_splits_the_gas_coin() {
    let client = NullLedgerClient::new().with_gas_balance(1_000);
    let controller = controller(client.clone());

    controller
        .deposit(&split_id(), Mist::new(250), &signer())
        .await
        .unwrap();

    let tx = &client.executed()[0].transaction_block;
    assert_eq!(
        tx.commands[0],
        Command::SplitCoins {
            coin: Argument::GasCoin,
            amounts: vec![Argument::Input { index: 0 }],
        }
    );
    let call = tx.move_calls().next().unwrap();
    assert_eq!(call.target.function, "deposit");
    assert_eq!(
        call.arguments,
        vec![
            Argument::Input { index: 1 },
            Argument::NestedResult {
                index: 0,
                result_index: 0
            },
        ]
    );
    assert_eq!(client.gas_balance(), Some(750));
}

#[tokio::test]
async fn insufficient_funds_surface_as_ledger_error() {
    let client = NullLedgerClient::new().with_gas_balance(100);
    let controller = controller(client.clone());

    let err = controller
        .deposit(&split_id(), Mist::new(500), &signer())
        .await
        .unwrap_err();

    let AppError::Ledger(LedgerError::Rpc { message, .. }) = &err else {
        panic!("expected ledger rpc error, got {err:?}");
    };
    assert!(message.contains("InsufficientCoinBalance"));
    assert_eq!(client.gas_balance(), Some(100));
}

#[tokio::test]
async fn repeated_distribute_is_issued_each_time() {
    let client = NullLedgerClient::new();
    let controller = controller(client.clone());

    controller.distribute(&split_id(), &signer()).await.unwrap();
    controller.distribute(&split_id(), &signer()).await.unwrap();

    assert_eq!(client.executed().len(), 2);
}

// ---------------------------------------------------------------------------
// Fetching
// ---------------------------------------------------------------------------

#[tokio::test]
async fn refreshed_split_is_cached_and_selectable() {
    let client = NullLedgerClient::new();
    client.insert_object(
        split_id(),
        json!({
            "dataType": "moveObject",
            "fields": {
                "members": ["A", "B"],
                "percentages": ["7000", "3000"],
                "balance": "42"
            }
        }),
    );
    let controller = controller(client.clone());

    let record = controller.refresh_split(&split_id()).await.unwrap();
    assert_eq!(record.balance, Mist::new(42));
    assert_eq!(client.fetched(), vec![split_id()]);

    controller.select_split(Some(split_id()));
    let store = controller.snapshot();
    assert_eq!(store.splits(), &[record.clone()]);
    assert_eq!(store.selected_split(), Some(&record));
}

#[tokio::test]
async fn missing_split_sets_error() {
    let controller = controller(NullLedgerClient::new());

    let err = controller.refresh_split(&split_id()).await.unwrap_err();

    assert!(matches!(err, AppError::InvalidSplitObject(_)));
    let store = controller.snapshot();
    assert!(store.splits().is_empty());
    assert!(store.error().is_some());
}
