//! Integration tests for the Merkle airdrop.
//!
//! Allowlists go through the builder library exactly as the CLI would run
//! them, and the resulting root and proof file are fed to the distributor
//! contract through its `instantiate` / `execute` / `query` entry points
//! using `cosmwasm_std::testing` mocks.
//!
//! Run:
//! ```bash
//! cargo test -p airdrop-integration-tests
//! ```

use airdrop_builder::{
    build_round, parse_allowlist, read_json, verify_round, write_artifacts, BuildOptions,
    InputFormat, RoundArtifacts,
};
use airdrop_common::{parse_address, HashAlgorithm, ProofEntry, ProofFile, RoundConfig};
use airdrop_distributor::contract::{execute, instantiate, query};
use airdrop_distributor::msg::{
    ClaimStatusResponse, ClaimsResponse, ExecuteMsg, InstantiateMsg, QueryMsg, StatsResponse,
};
use airdrop_distributor::ContractError;
use cosmwasm_std::testing::{
    message_info, mock_dependencies, mock_env, MockApi, MockQuerier, MockStorage,
};
use cosmwasm_std::{
    from_json, Addr, Api, BankMsg, CanonicalAddr, CosmosMsg, Deps, DepsMut, Env, OwnedDeps,
    Response, Uint128, Uint256,
};

// ─── Constants ───

const DENOM: &str = "uair";
const DAY: u64 = 24 * 60 * 60;

const ALLOWLIST: &str = "\
address,amount
# early contributors
0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed,1000000
0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359,250000
0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB,750000

# community
0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb,42
0x8617E340B3D01FA5F11F306F4090FD50E238070D,5000000
";

const ALICE: &str = "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed";
const BOB: &str = "0xfb6916095ca1df60bb79ce92ce3ea74c37c5d359";
const CAROL: &str = "0xdbf03b407c01e7cd3cbea99509d93f8dddc8c6fb";

type Deployment = OwnedDeps<MockStorage, MockApi, MockQuerier>;

// ─── Helpers ───

/// Chain address whose canonical bytes are the allowlisted 20-byte account.
fn claimant(address_hex: &str) -> Addr {
    let bytes = parse_address(address_hex).unwrap();
    MockApi::default()
        .addr_humanize(&CanonicalAddr::from(bytes.to_vec()))
        .unwrap()
}

fn build(allowlist: &str, hash_algorithm: HashAlgorithm) -> RoundArtifacts {
    let entries = parse_allowlist(allowlist, InputFormat::Csv).unwrap();
    build_round(&entries, &BuildOptions::new(hash_algorithm, 30)).unwrap()
}

fn deploy(config: &RoundConfig, claimable_cap: Uint256) -> Deployment {
    let mut deps = mock_dependencies();
    let admin = deps.api.addr_make("admin");
    instantiate(
        deps.as_mut(),
        mock_env(),
        message_info(&admin, &[]),
        InstantiateMsg {
            admin: None,
            denom: DENOM.to_string(),
            merkle_root: config.merkle_root.clone(),
            claim_period_seconds: config.claim_period_days * DAY,
            claimable_cap,
            hash_algorithm: Some(config.hash_algorithm),
        },
    )
    .unwrap();
    deps
}

fn claim(deps: DepsMut, env: Env, entry: &ProofEntry) -> Result<Response, ContractError> {
    execute(
        deps,
        env,
        message_info(&claimant(&entry.address), &[]),
        ExecuteMsg::Claim {
            amount: entry.amount,
            proof: entry.proof.clone(),
        },
    )
}

fn payout(res: &Response) -> (String, Uint128) {
    assert_eq!(res.messages.len(), 1);
    match &res.messages[0].msg {
        CosmosMsg::Bank(BankMsg::Send { to_address, amount }) => {
            assert_eq!(amount.len(), 1);
            assert_eq!(amount[0].denom, DENOM);
            (to_address.clone(), amount[0].amount)
        }
        other => panic!("unexpected message: {other:?}"),
    }
}

fn stats(deps: Deps, env: Env) -> StatsResponse {
    from_json(query(deps, env, QueryMsg::Stats {}).unwrap()).unwrap()
}

// ─── Tests ───

#[test]
fn test_full_round_every_allowlisted_account_claims_once() {
    let round = build(ALLOWLIST, HashAlgorithm::Keccak256);
    assert_eq!(round.config.total_users, 5);
    assert_eq!(round.config.total_tokens, Uint256::from(7_000_042u128));

    let mut deps = deploy(&round.config, round.config.total_tokens);

    let mut paid = Uint128::zero();
    for entry in round.proofs.values() {
        let res = claim(deps.as_mut(), mock_env(), entry).unwrap();
        let (to, amount) = payout(&res);
        assert_eq!(to, claimant(&entry.address).to_string());
        assert_eq!(Uint256::from(amount), entry.amount);
        paid += amount;
    }
    assert_eq!(paid, Uint128::new(7_000_042));

    let s = stats(deps.as_ref(), mock_env());
    assert_eq!(s.merkle_root, round.config.merkle_root);
    assert_eq!(s.total_claimed, round.config.total_tokens);
    assert_eq!(s.total_claimants, 5);
    assert_eq!(s.remaining, Uint256::zero());
    assert!(!s.active);

    // Nobody gets a second payout
    for entry in round.proofs.values() {
        let err = claim(deps.as_mut(), mock_env(), entry).unwrap_err();
        assert!(matches!(err, ContractError::AlreadyClaimed { .. }));
    }
}

#[test]
fn test_proof_is_bound_to_claimant_and_amount() {
    let round = build(ALLOWLIST, HashAlgorithm::Keccak256);
    let mut deps = deploy(&round.config, round.config.total_tokens);
    let alice = &round.proofs[ALICE];

    // Bob submits Alice's amount and proof
    let err = execute(
        deps.as_mut(),
        mock_env(),
        message_info(&claimant(BOB), &[]),
        ExecuteMsg::Claim {
            amount: alice.amount,
            proof: alice.proof.clone(),
        },
    )
    .unwrap_err();
    assert!(matches!(err, ContractError::InvalidMerkleProof));

    // Alice asks for one token more than allotted
    let mut inflated = alice.clone();
    inflated.amount += Uint256::one();
    let err = claim(deps.as_mut(), mock_env(), &inflated).unwrap_err();
    assert!(matches!(err, ContractError::InvalidMerkleProof));

    // Proof of another member does not help either
    let mut borrowed = alice.clone();
    borrowed.proof = round.proofs[CAROL].proof.clone();
    let err = claim(deps.as_mut(), mock_env(), &borrowed).unwrap_err();
    assert!(matches!(err, ContractError::InvalidMerkleProof));

    let eligible: bool = from_json(
        query(
            deps.as_ref(),
            mock_env(),
            QueryMsg::VerifyEligibility {
                address: claimant(ALICE).to_string(),
                amount: alice.amount,
                proof: alice.proof.clone(),
            },
        )
        .unwrap(),
    )
    .unwrap();
    assert!(eligible);

    claim(deps.as_mut(), mock_env(), alice).unwrap();
    assert_eq!(stats(deps.as_ref(), mock_env()).total_claimants, 1);
}

#[test]
fn test_cap_and_window_limit_claims() {
    let round = build(ALLOWLIST, HashAlgorithm::Keccak256);
    // Enough for Alice and Carol only
    let mut deps = deploy(&round.config, Uint256::from(1_800_000u128));

    claim(deps.as_mut(), mock_env(), &round.proofs[ALICE]).unwrap();
    claim(deps.as_mut(), mock_env(), &round.proofs[CAROL]).unwrap();

    let err = claim(deps.as_mut(), mock_env(), &round.proofs[BOB]).unwrap_err();
    assert!(matches!(
        err,
        ContractError::InsufficientRemaining { requested, remaining }
            if requested == Uint256::from(250_000u128) && remaining == Uint256::from(50_000u128)
    ));

    // Bob is still unclaimed and the totals did not move
    let status: ClaimStatusResponse = from_json(
        query(
            deps.as_ref(),
            mock_env(),
            QueryMsg::ClaimStatus {
                address: claimant(BOB).to_string(),
            },
        )
        .unwrap(),
    )
    .unwrap();
    assert!(!status.claimed);
    assert_eq!(
        stats(deps.as_ref(), mock_env()).total_claimed,
        Uint256::from(1_750_000u128)
    );

    // The 42-token account still fits under the cap, until the window closes
    let small = round
        .proofs
        .values()
        .find(|entry| entry.amount == Uint256::from(42u128))
        .unwrap();
    let mut late = mock_env();
    late.block.time = late.block.time.plus_seconds(30 * DAY + 1);
    let err = claim(deps.as_mut(), late.clone(), small).unwrap_err();
    assert!(matches!(err, ContractError::ClaimWindowClosed { .. }));
    assert!(!stats(deps.as_ref(), late).active);

    claim(deps.as_mut(), mock_env(), small).unwrap();
}

#[test]
fn test_admin_publishes_corrected_round() {
    let first = build(ALLOWLIST, HashAlgorithm::Keccak256);
    let mut deps = deploy(&first.config, first.config.total_tokens);
    claim(deps.as_mut(), mock_env(), &first.proofs[ALICE]).unwrap();

    // Bob was under-allocated; the allowlist is fixed and rebuilt
    let corrected_list = ALLOWLIST.replace(
        "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359,250000",
        "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359,400000",
    );
    let second = build(&corrected_list, HashAlgorithm::Keccak256);
    assert_ne!(first.config.merkle_root, second.config.merkle_root);

    let admin = deps.api.addr_make("admin");
    execute(
        deps.as_mut(),
        mock_env(),
        message_info(&admin, &[]),
        ExecuteMsg::UpdateRound {
            merkle_root: second.config.merkle_root.clone(),
            end_time: mock_env().block.time.plus_seconds(60 * DAY),
            claimable_cap: second.config.total_tokens,
        },
    )
    .unwrap();

    // Old proof is dead, the corrected one pays the new amount
    let err = claim(deps.as_mut(), mock_env(), &first.proofs[BOB]).unwrap_err();
    assert!(matches!(err, ContractError::InvalidMerkleProof));
    let res = claim(deps.as_mut(), mock_env(), &second.proofs[BOB]).unwrap();
    assert_eq!(payout(&res).1, Uint128::new(400_000));

    // Alice's claim from the first round still counts
    let err = claim(deps.as_mut(), mock_env(), &second.proofs[ALICE]).unwrap_err();
    assert!(matches!(err, ContractError::AlreadyClaimed { .. }));

    let s = stats(deps.as_ref(), mock_env());
    assert_eq!(s.total_claimed, Uint256::from(1_400_000u128));
    assert_eq!(s.total_claimants, 2);

    let page: ClaimsResponse = from_json(
        query(
            deps.as_ref(),
            mock_env(),
            QueryMsg::Claims {
                start_after: None,
                limit: None,
            },
        )
        .unwrap(),
    )
    .unwrap();
    assert_eq!(page.claims.len(), 2);
}

#[test]
fn test_sha256_round() {
    let round = build(ALLOWLIST, HashAlgorithm::Sha256);
    let keccak = build(ALLOWLIST, HashAlgorithm::Keccak256);
    assert_ne!(round.config.merkle_root, keccak.config.merkle_root);

    let mut deps = deploy(&round.config, round.config.total_tokens);

    // Keccak proofs are useless against a sha256 root
    let err = claim(deps.as_mut(), mock_env(), &keccak.proofs[CAROL]).unwrap_err();
    assert!(matches!(err, ContractError::InvalidMerkleProof));

    for entry in round.proofs.values() {
        claim(deps.as_mut(), mock_env(), entry).unwrap();
    }
    assert_eq!(
        stats(deps.as_ref(), mock_env()).total_claimed,
        round.config.total_tokens
    );
}

#[test]
fn test_published_files_drive_claims() {
    let dir = std::env::temp_dir().join(format!("airdrop-integration-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    let proofs_path = dir.join("proofs.json");
    let round_path = dir.join("round.json");

    let built = build(ALLOWLIST, HashAlgorithm::Keccak256);
    write_artifacts(&built, &proofs_path, &round_path).unwrap();

    // What a claimant-facing app would load
    let config: RoundConfig = read_json(&round_path).unwrap();
    let proofs: ProofFile = read_json(&proofs_path).unwrap();
    verify_round(&config, &proofs).unwrap();

    let raw: serde_json::Value = read_json(&round_path).unwrap();
    assert_eq!(raw["totalTokens"], "7000042");

    let mut deps = deploy(&config, config.total_tokens);
    let res = claim(deps.as_mut(), mock_env(), &proofs[CAROL]).unwrap();
    assert_eq!(payout(&res).1, Uint128::new(750_000));

    std::fs::remove_dir_all(&dir).unwrap();
}
