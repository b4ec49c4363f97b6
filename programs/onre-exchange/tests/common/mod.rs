#![allow(dead_code)]

use anchor_lang::AccountDeserialize;
use litesvm::LiteSVM;
use onre_exchange::instructions::{Offer, OfferAccount};
use onre_exchange::state::State;
use solana_sdk::{
    account::Account,
    clock::Clock,
    instruction::{AccountMeta, Instruction},
    message::Message,
    pubkey::Pubkey,
    signature::Keypair,
    signer::Signer,
    transaction::Transaction,
};
use std::convert::TryInto;

// ---------------------------------------------------------------------------
// Program IDs
// ---------------------------------------------------------------------------
pub const PROGRAM_ID: Pubkey = solana_sdk::pubkey!("7DRDmxEAnqRoRqhmZwNFJuMBLRNa1ZMZfy1oLZErKhEj");
pub const TOKEN_PROGRAM_ID: Pubkey =
    solana_sdk::pubkey!("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA");
pub const ATA_PROGRAM_ID: Pubkey =
    solana_sdk::pubkey!("ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL");
pub const SYSTEM_PROGRAM_ID: Pubkey = solana_sdk::pubkey!("11111111111111111111111111111111");
pub const BPF_UPGRADEABLE_LOADER_ID: Pubkey =
    solana_sdk::pubkey!("BPFLoaderUpgradeab1e11111111111111111111111");
pub const ED25519_PROGRAM_ID: Pubkey =
    solana_sdk::pubkey!("Ed25519SigVerify111111111111111111111111111");
pub const SYSVAR_INSTRUCTIONS_ID: Pubkey =
    solana_sdk::pubkey!("Sysvar1nstructions1111111111111111111111111");

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------
pub const INITIAL_LAMPORTS: u64 = 1_000_000_000;
pub const MAX_ADMINS: usize = 20;
pub const DAY: u64 = 86_400;
/// Jan 1, 2024
pub const GENESIS_TIME: i64 = 1_704_067_200;

// PDA seeds (must match constants.rs in the program)
pub const STATE_SEED: &[u8] = b"state";
pub const OFFERS_SEED: &[u8] = b"offers";
pub const OFFER_VAULT_AUTHORITY_SEED: &[u8] = b"offer_vault_authority";
pub const PERMISSIONLESS_AUTHORITY_SEED: &[u8] = b"permissionless-1";
pub const MINT_AUTHORITY_SEED: &[u8] = b"mint_authority";

/// Borsh discriminants of `PricingModel`
pub const GROWTH_VECTOR: u8 = 0;
pub const BOUNDED_SEGMENT: u8 = 1;

// ---------------------------------------------------------------------------
// ATA derivation
// ---------------------------------------------------------------------------
pub fn get_associated_token_address(wallet: &Pubkey, mint: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(
        &[wallet.as_ref(), TOKEN_PROGRAM_ID.as_ref(), mint.as_ref()],
        &ATA_PROGRAM_ID,
    )
    .0
}

// ---------------------------------------------------------------------------
// Anchor discriminators
// ---------------------------------------------------------------------------
pub fn ix_discriminator(name: &str) -> [u8; 8] {
    let preimage = format!("global:{}", name);
    let hash = solana_sdk::hash::hash(preimage.as_bytes());
    let mut disc = [0u8; 8];
    disc.copy_from_slice(&hash.to_bytes()[..8]);
    disc
}

// ---------------------------------------------------------------------------
// PDA derivation helpers
// ---------------------------------------------------------------------------
pub fn find_state_pda() -> (Pubkey, u8) {
    Pubkey::find_program_address(&[STATE_SEED], &PROGRAM_ID)
}

pub fn find_offers_pda() -> (Pubkey, u8) {
    Pubkey::find_program_address(&[OFFERS_SEED], &PROGRAM_ID)
}

pub fn find_offer_vault_authority_pda() -> (Pubkey, u8) {
    Pubkey::find_program_address(&[OFFER_VAULT_AUTHORITY_SEED], &PROGRAM_ID)
}

pub fn find_permissionless_authority_pda() -> (Pubkey, u8) {
    Pubkey::find_program_address(&[PERMISSIONLESS_AUTHORITY_SEED], &PROGRAM_ID)
}

pub fn find_mint_authority_pda() -> (Pubkey, u8) {
    Pubkey::find_program_address(&[MINT_AUTHORITY_SEED], &PROGRAM_ID)
}

pub fn find_program_data_pda() -> Pubkey {
    Pubkey::find_program_address(&[PROGRAM_ID.as_ref()], &BPF_UPGRADEABLE_LOADER_ID).0
}

// ---------------------------------------------------------------------------
// Transaction helpers
// ---------------------------------------------------------------------------
pub fn send_tx(
    svm: &mut LiteSVM,
    ixs: &[Instruction],
    signers: &[&Keypair],
) -> Result<litesvm::types::TransactionMetadata, litesvm::types::FailedTransactionMetadata> {
    let payer = signers[0].pubkey();
    let blockhash = svm.latest_blockhash();
    let msg = Message::new(ixs, Some(&payer));
    let tx = Transaction::new(signers, msg, blockhash);
    let result = svm.send_transaction(tx);
    // Identical transactions in one test would otherwise be rejected as duplicates
    svm.expire_blockhash();
    result
}

/// Asserts the transaction failed with the given Anchor error name
pub fn assert_anchor_error(
    result: Result<litesvm::types::TransactionMetadata, litesvm::types::FailedTransactionMetadata>,
    error_name: &str,
) {
    let failure = match result {
        Ok(_) => panic!("expected failure with {}, transaction succeeded", error_name),
        Err(failure) => failure,
    };
    let needle = format!("Error Code: {}", error_name);
    assert!(
        failure.meta.logs.iter().any(|line| line.contains(&needle)),
        "expected {} in logs: {:#?}",
        error_name,
        failure.meta.logs
    );
}

pub fn get_token_balance(svm: &LiteSVM, token_account: &Pubkey) -> u64 {
    let account = svm.get_account(token_account).expect("account not found");
    u64::from_le_bytes(account.data[64..72].try_into().unwrap())
}

pub fn get_mint_supply(svm: &LiteSVM, mint: &Pubkey) -> u64 {
    let account = svm.get_account(mint).expect("mint account not found");
    // SPL Token Mint layout: supply is at offset 36..44
    u64::from_le_bytes(account.data[36..44].try_into().unwrap())
}

pub fn get_return_u64(metadata: &litesvm::types::TransactionMetadata) -> u64 {
    u64::from_le_bytes(metadata.return_data.data[..8].try_into().unwrap())
}

// ---------------------------------------------------------------------------
// Setup: load program as upgradeable, create payer as upgrade authority
// ---------------------------------------------------------------------------
pub fn setup() -> (LiteSVM, Keypair) {
    let mut svm = LiteSVM::new();

    let payer = Keypair::new();
    svm.airdrop(&payer.pubkey(), 100 * INITIAL_LAMPORTS)
        .unwrap();

    let program_bytes = include_bytes!("../../../../target/deploy/onre_exchange.so");
    let program_data_pda = find_program_data_pda();

    // UpgradeableLoaderState::ProgramData (bincode serialization):
    //   [0..4]:   variant discriminator = 3
    //   [4..12]:  slot: u64
    //   [12]:     Option tag: 1 = Some
    //   [13..45]: upgrade_authority_address: Pubkey
    //   [45..]:   ELF bytes
    let mut program_data_account_data = vec![0u8; 45 + program_bytes.len()];
    program_data_account_data[0..4].copy_from_slice(&3u32.to_le_bytes());
    program_data_account_data[4..12].copy_from_slice(&0u64.to_le_bytes());
    program_data_account_data[12] = 1;
    program_data_account_data[13..45].copy_from_slice(payer.pubkey().as_ref());
    program_data_account_data[45..].copy_from_slice(program_bytes);

    svm.set_account(
        program_data_pda,
        Account {
            executable: false,
            data: program_data_account_data,
            lamports: 100 * INITIAL_LAMPORTS,
            owner: BPF_UPGRADEABLE_LOADER_ID,
            rent_epoch: 0,
        },
    )
    .unwrap();

    // UpgradeableLoaderState::Program (bincode serialization):
    //   [0..4]:   variant discriminator = 2
    //   [4..36]:  programdata_address: Pubkey
    let mut program_account_data = vec![0u8; 36];
    program_account_data[0..4].copy_from_slice(&2u32.to_le_bytes());
    program_account_data[4..36].copy_from_slice(program_data_pda.as_ref());

    svm.set_account(
        PROGRAM_ID,
        Account {
            executable: true,
            data: program_account_data,
            lamports: INITIAL_LAMPORTS,
            owner: BPF_UPGRADEABLE_LOADER_ID,
            rent_epoch: 0,
        },
    )
    .unwrap();

    svm.set_sysvar(&Clock {
        slot: 0,
        epoch_start_timestamp: 0,
        epoch: 0,
        leader_schedule_epoch: 0,
        unix_timestamp: GENESIS_TIME,
    });

    (svm, payer)
}

/// State and offer registry initialized, payer is the boss.
pub fn setup_initialized() -> (LiteSVM, Keypair, Pubkey) {
    let (mut svm, payer) = setup();
    let boss = payer.pubkey();
    let reference_mint = create_mint(&mut svm, 9, &boss);
    let ix = build_initialize_ix(&boss, &reference_mint);
    send_tx(&mut svm, &[ix], &[&payer]).expect("initialize failed");
    let ix = build_initialize_offers_ix(&boss);
    send_tx(&mut svm, &[ix], &[&payer]).expect("initialize_offers failed");
    (svm, payer, reference_mint)
}

/// Initialized program with one offer between two fresh 9-decimal mints.
/// Returns the mints and the offer ID.
pub fn setup_offer_with_mints(pricing_model: u8) -> (LiteSVM, Keypair, Pubkey, Pubkey, u64) {
    let (mut svm, payer, _) = setup_initialized();
    let boss = payer.pubkey();

    let token_in = create_mint(&mut svm, 9, &boss);
    let token_out = create_mint(&mut svm, 9, &boss);

    let ix = build_make_offer_ix(&boss, &token_in, &token_out, 0, false, pricing_model);
    send_tx(&mut svm, &[ix], &[&payer]).expect("make_offer failed");
    let offer_id = read_offer_registry(&svm).counter;

    (svm, payer, token_in, token_out, offer_id)
}

pub fn get_clock_time(svm: &LiteSVM) -> u64 {
    let clock: Clock = svm.get_sysvar();
    clock.unix_timestamp as u64
}

pub fn advance_clock_by(svm: &mut LiteSVM, seconds: u64) {
    let clock: Clock = svm.get_sysvar();
    svm.set_sysvar(&Clock {
        slot: clock.slot + 1,
        epoch_start_timestamp: clock.epoch_start_timestamp,
        epoch: clock.epoch,
        leader_schedule_epoch: clock.leader_schedule_epoch,
        unix_timestamp: clock.unix_timestamp + seconds as i64,
    });
    svm.expire_blockhash();
}

// ---------------------------------------------------------------------------
// Account creation helpers
// ---------------------------------------------------------------------------
pub fn create_mint(svm: &mut LiteSVM, decimals: u8, mint_authority: &Pubkey) -> Pubkey {
    let mint = Keypair::new();

    // SPL Token Mint layout (82 bytes)
    let mut mint_data = vec![0u8; 82];
    // [0..4]:   mint_authority COption tag (Some)
    mint_data[0..4].copy_from_slice(&1u32.to_le_bytes());
    // [4..36]:  mint_authority Pubkey
    mint_data[4..36].copy_from_slice(mint_authority.as_ref());
    // [36..44]: supply = 0
    // [44]:     decimals
    mint_data[44] = decimals;
    // [45]:     is_initialized
    mint_data[45] = 1;
    // [46..82]: freeze_authority None

    svm.set_account(
        mint.pubkey(),
        Account {
            executable: false,
            data: mint_data,
            lamports: INITIAL_LAMPORTS,
            owner: TOKEN_PROGRAM_ID,
            rent_epoch: 0,
        },
    )
    .unwrap();

    mint.pubkey()
}

/// Writes an initialized token account at the owner's ATA address.
/// Mint supply is not adjusted.
pub fn create_token_account(
    svm: &mut LiteSVM,
    mint: &Pubkey,
    owner: &Pubkey,
    amount: u64,
) -> Pubkey {
    let ata = get_associated_token_address(owner, mint);

    // SPL Token Account layout (165 bytes)
    let mut data = vec![0u8; 165];
    // [0..32]:   mint
    data[0..32].copy_from_slice(mint.as_ref());
    // [32..64]:  owner
    data[32..64].copy_from_slice(owner.as_ref());
    // [64..72]:  amount
    data[64..72].copy_from_slice(&amount.to_le_bytes());
    // [108]:     state = Initialized
    data[108] = 1;

    svm.set_account(
        ata,
        Account {
            executable: false,
            data,
            lamports: INITIAL_LAMPORTS,
            owner: TOKEN_PROGRAM_ID,
            rent_epoch: 0,
        },
    )
    .unwrap();

    ata
}

pub fn get_mint_authority_pubkey(svm: &LiteSVM, mint: &Pubkey) -> Option<Pubkey> {
    let account = svm.get_account(mint)?;
    // COption<Pubkey>: [0..4] tag, [4..36] pubkey
    let tag = u32::from_le_bytes(account.data[0..4].try_into().unwrap());
    if tag == 1 {
        Some(Pubkey::try_from(&account.data[4..36]).unwrap())
    } else {
        None
    }
}

pub fn set_mint_authority(svm: &mut LiteSVM, mint: &Pubkey, new_authority: &Pubkey) {
    let mut account = svm.get_account(mint).expect("mint not found");
    account.data[0..4].copy_from_slice(&1u32.to_le_bytes());
    account.data[4..36].copy_from_slice(new_authority.as_ref());
    svm.set_account(*mint, account).unwrap();
}

// ---------------------------------------------------------------------------
// Account readers
// ---------------------------------------------------------------------------
pub fn read_state(svm: &LiteSVM) -> State {
    let (state_pda, _) = find_state_pda();
    let account = svm
        .get_account(&state_pda)
        .expect("state account not found");
    State::try_deserialize(&mut account.data.as_slice()).expect("failed to deserialize State")
}

pub fn active_admins(state: &State) -> Vec<Pubkey> {
    state
        .admins
        .iter()
        .filter(|admin| **admin != Pubkey::default())
        .copied()
        .collect()
}

pub fn read_offer_registry(svm: &LiteSVM) -> OfferAccount {
    let (offers_pda, _) = find_offers_pda();
    let account = svm
        .get_account(&offers_pda)
        .expect("offer registry not found");
    // skip Anchor discriminator, account data is not guaranteed 8-byte aligned
    bytemuck::pod_read_unaligned(&account.data[8..8 + std::mem::size_of::<OfferAccount>()])
}

pub fn read_offer(svm: &LiteSVM, offer_id: u64) -> Option<Offer> {
    read_offer_registry(svm)
        .offers
        .iter()
        .find(|offer| offer.offer_id == offer_id)
        .copied()
}

// ---------------------------------------------------------------------------
// Initialization instruction builders
// ---------------------------------------------------------------------------
pub fn build_initialize_ix(boss: &Pubkey, reference_mint: &Pubkey) -> Instruction {
    let (state_pda, _) = find_state_pda();
    let program_data_pda = find_program_data_pda();

    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(state_pda, false),
            AccountMeta::new(*boss, true),
            AccountMeta::new_readonly(PROGRAM_ID, false),
            AccountMeta::new_readonly(program_data_pda, false),
            AccountMeta::new_readonly(*reference_mint, false),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
        ],
        data: ix_discriminator("initialize").to_vec(),
    }
}

pub fn build_initialize_offers_ix(boss: &Pubkey) -> Instruction {
    let (state_pda, _) = find_state_pda();
    let (offers_pda, _) = find_offers_pda();

    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(offers_pda, false),
            AccountMeta::new(*boss, true),
            AccountMeta::new_readonly(state_pda, false),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
        ],
        data: ix_discriminator("initialize_offers").to_vec(),
    }
}

pub fn build_initialize_permissionless_ix(boss: &Pubkey, name: &str) -> Instruction {
    let (state_pda, _) = find_state_pda();
    let (permissionless_pda, _) = find_permissionless_authority_pda();

    let mut data = ix_discriminator("initialize_permissionless_account").to_vec();
    data.extend_from_slice(&(name.len() as u32).to_le_bytes());
    data.extend_from_slice(name.as_bytes());

    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(permissionless_pda, false),
            AccountMeta::new_readonly(state_pda, false),
            AccountMeta::new(*boss, true),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
        ],
        data,
    }
}

// ---------------------------------------------------------------------------
// State operation builders
// ---------------------------------------------------------------------------
fn build_state_ix(name: &str, signer: &Pubkey, args: &[u8]) -> Instruction {
    let (state_pda, _) = find_state_pda();

    let mut data = ix_discriminator(name).to_vec();
    data.extend_from_slice(args);

    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(state_pda, false),
            AccountMeta::new_readonly(*signer, true),
        ],
        data,
    }
}

pub fn build_add_admin_ix(boss: &Pubkey, new_admin: &Pubkey) -> Instruction {
    build_state_ix("add_admin", boss, new_admin.as_ref())
}

pub fn build_remove_admin_ix(boss: &Pubkey, admin: &Pubkey) -> Instruction {
    build_state_ix("remove_admin", boss, admin.as_ref())
}

pub fn build_clear_admins_ix(boss: &Pubkey) -> Instruction {
    build_state_ix("clear_admins", boss, &[])
}

pub fn build_set_kill_switch_ix(signer: &Pubkey, enable: bool) -> Instruction {
    build_state_ix("set_kill_switch", signer, &[enable as u8])
}

pub fn build_set_approver_ix(boss: &Pubkey, approver: &Pubkey) -> Instruction {
    build_state_ix("set_approver", boss, approver.as_ref())
}

pub fn build_set_boss_ix(boss: &Pubkey, new_boss: &Pubkey) -> Instruction {
    build_state_ix("set_boss", boss, new_boss.as_ref())
}

// ---------------------------------------------------------------------------
// Offer instruction builders
// ---------------------------------------------------------------------------
pub fn build_make_offer_ix(
    boss: &Pubkey,
    token_in_mint: &Pubkey,
    token_out_mint: &Pubkey,
    fee_basis_points: u16,
    needs_approval: bool,
    pricing_model: u8,
) -> Instruction {
    let (state_pda, _) = find_state_pda();
    let (offers_pda, _) = find_offers_pda();

    let mut data = ix_discriminator("make_offer").to_vec();
    data.extend_from_slice(&fee_basis_points.to_le_bytes());
    data.push(needs_approval as u8);
    data.push(pricing_model);

    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(offers_pda, false),
            AccountMeta::new_readonly(*token_in_mint, false),
            AccountMeta::new_readonly(*token_out_mint, false),
            AccountMeta::new_readonly(state_pda, false),
            AccountMeta::new_readonly(*boss, true),
        ],
        data,
    }
}

fn build_offer_admin_ix(name: &str, boss: &Pubkey, args: &[u8]) -> Instruction {
    let (state_pda, _) = find_state_pda();
    let (offers_pda, _) = find_offers_pda();

    let mut data = ix_discriminator(name).to_vec();
    data.extend_from_slice(args);

    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(offers_pda, false),
            AccountMeta::new_readonly(state_pda, false),
            AccountMeta::new_readonly(*boss, true),
        ],
        data,
    }
}

pub fn build_close_offer_ix(boss: &Pubkey, offer_id: u64) -> Instruction {
    build_offer_admin_ix("close_offer", boss, &offer_id.to_le_bytes())
}

pub fn build_update_offer_fee_ix(boss: &Pubkey, offer_id: u64, fee_basis_points: u16) -> Instruction {
    let mut args = offer_id.to_le_bytes().to_vec();
    args.extend_from_slice(&fee_basis_points.to_le_bytes());
    build_offer_admin_ix("update_offer_fee", boss, &args)
}

pub fn build_add_offer_vector_ix(
    boss: &Pubkey,
    offer_id: u64,
    start_time: u64,
    base_price: u64,
    apr: u64,
    price_fix_duration: u64,
) -> Instruction {
    let mut args = Vec::with_capacity(40);
    for value in [offer_id, start_time, base_price, apr, price_fix_duration] {
        args.extend_from_slice(&value.to_le_bytes());
    }
    build_offer_admin_ix("add_offer_vector", boss, &args)
}

pub fn build_delete_offer_vector_ix(boss: &Pubkey, offer_id: u64, vector_id: u64) -> Instruction {
    let mut args = offer_id.to_le_bytes().to_vec();
    args.extend_from_slice(&vector_id.to_le_bytes());
    build_offer_admin_ix("delete_offer_vector", boss, &args)
}

pub fn build_add_offer_segment_ix(
    boss: &Pubkey,
    offer_id: u64,
    start_time: u64,
    end_time: u64,
    start_price: u64,
    end_price: u64,
    price_fix_duration: u64,
) -> Instruction {
    let mut args = Vec::with_capacity(48);
    for value in [
        offer_id,
        start_time,
        end_time,
        start_price,
        end_price,
        price_fix_duration,
    ] {
        args.extend_from_slice(&value.to_le_bytes());
    }
    build_offer_admin_ix("add_offer_segment", boss, &args)
}

fn take_offer_data(
    name: &str,
    offer_id: u64,
    token_in_amount: u64,
    approval_message: Option<&[u8]>,
) -> Vec<u8> {
    let mut data = ix_discriminator(name).to_vec();
    data.extend_from_slice(&offer_id.to_le_bytes());
    data.extend_from_slice(&token_in_amount.to_le_bytes());
    // Borsh Option<ApprovalMessage>
    match approval_message {
        Some(msg_bytes) => {
            data.push(1);
            data.extend_from_slice(msg_bytes);
        }
        None => data.push(0),
    }
    data
}

pub fn build_take_offer_ix(
    user: &Pubkey,
    boss: &Pubkey,
    offer_id: u64,
    token_in_mint: &Pubkey,
    token_out_mint: &Pubkey,
    token_in_amount: u64,
    approval_message: Option<&[u8]>, // pre-serialized ApprovalMessage bytes
) -> Instruction {
    let (state_pda, _) = find_state_pda();
    let (offers_pda, _) = find_offers_pda();
    let (vault_authority_pda, _) = find_offer_vault_authority_pda();
    let (mint_authority_pda, _) = find_mint_authority_pda();

    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new_readonly(offers_pda, false),
            AccountMeta::new_readonly(state_pda, false),
            AccountMeta::new_readonly(*boss, false),
            AccountMeta::new_readonly(vault_authority_pda, false),
            AccountMeta::new(
                get_associated_token_address(&vault_authority_pda, token_out_mint),
                false,
            ),
            AccountMeta::new_readonly(*token_in_mint, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            AccountMeta::new(*token_out_mint, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            AccountMeta::new(get_associated_token_address(user, token_in_mint), false),
            AccountMeta::new(get_associated_token_address(user, token_out_mint), false),
            AccountMeta::new(get_associated_token_address(boss, token_in_mint), false),
            AccountMeta::new_readonly(mint_authority_pda, false),
            AccountMeta::new_readonly(SYSVAR_INSTRUCTIONS_ID, false),
            AccountMeta::new(*user, true),
            AccountMeta::new_readonly(ATA_PROGRAM_ID, false),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
        ],
        data: take_offer_data("take_offer", offer_id, token_in_amount, approval_message),
    }
}

pub fn build_take_offer_permissionless_ix(
    user: &Pubkey,
    boss: &Pubkey,
    offer_id: u64,
    token_in_mint: &Pubkey,
    token_out_mint: &Pubkey,
    token_in_amount: u64,
    approval_message: Option<&[u8]>,
) -> Instruction {
    let (state_pda, _) = find_state_pda();
    let (offers_pda, _) = find_offers_pda();
    let (vault_authority_pda, _) = find_offer_vault_authority_pda();
    let (permissionless_pda, _) = find_permissionless_authority_pda();
    let (mint_authority_pda, _) = find_mint_authority_pda();

    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new_readonly(offers_pda, false),
            AccountMeta::new_readonly(state_pda, false),
            AccountMeta::new_readonly(*boss, false),
            AccountMeta::new_readonly(vault_authority_pda, false),
            AccountMeta::new(
                get_associated_token_address(&vault_authority_pda, token_out_mint),
                false,
            ),
            AccountMeta::new_readonly(permissionless_pda, false),
            AccountMeta::new(
                get_associated_token_address(&permissionless_pda, token_in_mint),
                false,
            ),
            AccountMeta::new(
                get_associated_token_address(&permissionless_pda, token_out_mint),
                false,
            ),
            AccountMeta::new_readonly(*token_in_mint, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            AccountMeta::new(*token_out_mint, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            AccountMeta::new(get_associated_token_address(user, token_in_mint), false),
            AccountMeta::new(get_associated_token_address(user, token_out_mint), false),
            AccountMeta::new(get_associated_token_address(boss, token_in_mint), false),
            AccountMeta::new_readonly(mint_authority_pda, false),
            AccountMeta::new_readonly(SYSVAR_INSTRUCTIONS_ID, false),
            AccountMeta::new(*user, true),
            AccountMeta::new_readonly(ATA_PROGRAM_ID, false),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
        ],
        data: take_offer_data(
            "take_offer_permissionless",
            offer_id,
            token_in_amount,
            approval_message,
        ),
    }
}

/// Drops the reserve token_out account from a take instruction.
///
/// Anchor reads an optional account as absent when the program id sits in
/// its slot. Both take builders put the reserve at index 4.
pub fn without_reserve_account(mut ix: Instruction) -> Instruction {
    ix.accounts[4] = AccountMeta::new_readonly(PROGRAM_ID, false);
    ix
}

pub fn build_get_nav_ix(offer_id: u64) -> Instruction {
    let (offers_pda, _) = find_offers_pda();

    let mut data = ix_discriminator("get_nav").to_vec();
    data.extend_from_slice(&offer_id.to_le_bytes());

    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![AccountMeta::new_readonly(offers_pda, false)],
        data,
    }
}

// ---------------------------------------------------------------------------
// Vault and mint authority builders
// ---------------------------------------------------------------------------
fn build_vault_ix(name: &str, boss: &Pubkey, token_mint: &Pubkey, amount: u64) -> Instruction {
    let (state_pda, _) = find_state_pda();
    let (vault_authority_pda, _) = find_offer_vault_authority_pda();

    let mut data = ix_discriminator(name).to_vec();
    data.extend_from_slice(&amount.to_le_bytes());

    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new_readonly(vault_authority_pda, false),
            AccountMeta::new_readonly(*token_mint, false),
            AccountMeta::new(get_associated_token_address(boss, token_mint), false),
            AccountMeta::new(
                get_associated_token_address(&vault_authority_pda, token_mint),
                false,
            ),
            AccountMeta::new(*boss, true),
            AccountMeta::new_readonly(state_pda, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(ATA_PROGRAM_ID, false),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
        ],
        data,
    }
}

pub fn build_offer_vault_deposit_ix(boss: &Pubkey, token_mint: &Pubkey, amount: u64) -> Instruction {
    build_vault_ix("offer_vault_deposit", boss, token_mint, amount)
}

pub fn build_offer_vault_withdraw_ix(boss: &Pubkey, token_mint: &Pubkey, amount: u64) -> Instruction {
    build_vault_ix("offer_vault_withdraw", boss, token_mint, amount)
}

fn build_mint_authority_ix(name: &str, boss: &Pubkey, mint: &Pubkey) -> Instruction {
    let (state_pda, _) = find_state_pda();
    let (mint_authority_pda, _) = find_mint_authority_pda();

    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new_readonly(*boss, true),
            AccountMeta::new_readonly(state_pda, false),
            AccountMeta::new(*mint, false),
            AccountMeta::new_readonly(mint_authority_pda, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
        ],
        data: ix_discriminator(name).to_vec(),
    }
}

pub fn build_transfer_mint_authority_to_program_ix(boss: &Pubkey, mint: &Pubkey) -> Instruction {
    build_mint_authority_ix("transfer_mint_authority_to_program", boss, mint)
}

pub fn build_transfer_mint_authority_to_boss_ix(boss: &Pubkey, mint: &Pubkey) -> Instruction {
    build_mint_authority_ix("transfer_mint_authority_to_boss", boss, mint)
}

// ---------------------------------------------------------------------------
// Ed25519 helpers
// ---------------------------------------------------------------------------

/// Serialize an ApprovalMessage (Borsh: program_id || user_pubkey || expiry_unix)
pub fn serialize_approval_message(
    program_id: &Pubkey,
    user_pubkey: &Pubkey,
    expiry_unix: u64,
) -> Vec<u8> {
    let mut buf = Vec::with_capacity(72);
    buf.extend_from_slice(program_id.as_ref());
    buf.extend_from_slice(user_pubkey.as_ref());
    buf.extend_from_slice(&expiry_unix.to_le_bytes());
    buf
}

/// Build an Ed25519 verify instruction carrying one signature per signer,
/// all over the same message.
///
/// Layout: `[count, pad, offsets * count, (pubkey, signature) * count, message]`
pub fn build_ed25519_multi_verify_ix(signers: &[&Keypair], message: &[u8]) -> Instruction {
    const OFFSETS_LEN: usize = 14;
    const ENTRY_LEN: usize = 32 + 64;

    let header_len = 2 + OFFSETS_LEN * signers.len();
    let message_offset = header_len + ENTRY_LEN * signers.len();

    let mut data = Vec::with_capacity(message_offset + message.len());
    data.push(signers.len() as u8);
    data.push(0u8);

    for index in 0..signers.len() {
        let public_key_offset = (header_len + ENTRY_LEN * index) as u16;
        let signature_offset = public_key_offset + 32;
        data.extend_from_slice(&signature_offset.to_le_bytes());
        data.extend_from_slice(&u16::MAX.to_le_bytes());
        data.extend_from_slice(&public_key_offset.to_le_bytes());
        data.extend_from_slice(&u16::MAX.to_le_bytes());
        data.extend_from_slice(&(message_offset as u16).to_le_bytes());
        data.extend_from_slice(&(message.len() as u16).to_le_bytes());
        data.extend_from_slice(&u16::MAX.to_le_bytes());
    }

    for signer in signers {
        let signature = signer.sign_message(message);
        data.extend_from_slice(&signer.pubkey().to_bytes());
        data.extend_from_slice(&<[u8; 64]>::from(signature));
    }

    data.extend_from_slice(message);

    Instruction {
        program_id: ED25519_PROGRAM_ID,
        accounts: vec![],
        data,
    }
}

/// Build an Ed25519 verify instruction for the native precompile.
/// The approver signs the message, and the precompile checks the signature.
pub fn build_ed25519_verify_ix(approver: &Keypair, message: &[u8]) -> Instruction {
    build_ed25519_multi_verify_ix(&[approver], message)
}
