#![allow(dead_code)]

use anchor_lang::prelude::{AccountInfo, Pubkey};
use anchor_lang::solana_program::entrypoint::ProgramResult;
use anchor_lang::solana_program::program_pack::Pack;
use anchor_lang::{AccountDeserialize, AccountSerialize, InstructionData, Space, ToAccountMetas};
use anchor_spl::associated_token::{
    get_associated_token_address_with_program_id, spl_associated_token_account,
};
use anchor_spl::token_2022::spl_token_2022::{
    self,
    extension::{transfer_fee, ExtensionType, StateWithExtensions},
};
use solana_program_test::{processor, BanksClientError, ProgramTest, ProgramTestContext};
use solana_sdk::{
    account::Account,
    instruction::{Instruction, InstructionError},
    rent::Rent,
    signature::{Keypair, Signer},
    system_instruction, system_program,
    transaction::{Transaction, TransactionError},
};

use liquidity_pool::constants::ANCHOR_DISCRIMINATOR;
use liquidity_pool::state::{AmmsConfig, AmmsConfigsManager, CpAmm};

pub const LEGACY_TOKEN_PROGRAM: Pubkey = anchor_spl::token::ID;
pub const TOKEN_2022_PROGRAM: Pubkey = anchor_spl::token_2022::ID;
pub const MINT_DECIMALS: u8 = 6;
pub const PROTOCOL_FEE_BPS: u16 = 200;
pub const PROVIDERS_FEE_BPS: u16 = 300;
const WALLET_LAMPORTS: u64 = 10_000_000_000;

// The generated entrypoint ties the account slice and its items to one lifetime.
fn process_instruction<'a, 'b, 'c, 'd>(
    program_id: &'a Pubkey,
    accounts: &'b [AccountInfo<'c>],
    data: &'d [u8],
) -> ProgramResult {
    let accounts = Box::leak(Box::new(accounts.to_vec()));
    liquidity_pool::entry(program_id, accounts, data)
}

/// Custom error code carried by a failed transaction, if any.
pub fn custom_error_code(error: BanksClientError) -> Option<u32> {
    match error.unwrap() {
        TransactionError::InstructionError(_, InstructionError::Custom(code)) => Some(code),
        _ => None,
    }
}

fn program_owned<T: AccountSerialize>(state: &T, space: usize, owner: Pubkey) -> Account {
    let mut data = Vec::with_capacity(ANCHOR_DISCRIMINATOR + space);
    state.try_serialize(&mut data).unwrap();
    data.resize(ANCHOR_DISCRIMINATOR + space, 0);
    Account {
        lamports: Rent::default().minimum_balance(data.len()),
        data,
        owner,
        executable: false,
        rent_epoch: 0,
    }
}

fn wallet_account() -> Account {
    Account {
        lamports: WALLET_LAMPORTS,
        data: vec![],
        owner: system_program::ID,
        executable: false,
        rent_epoch: 0,
    }
}

pub fn manager_address() -> Pubkey {
    Pubkey::find_program_address(&[AmmsConfigsManager::SEED], &liquidity_pool::ID).0
}

pub fn config_address(id: u64) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[AmmsConfig::SEED, &id.to_le_bytes()], &liquidity_pool::ID)
}

/// Addresses of one pool, derived from its mints and LP mint.
#[derive(Clone, Copy, Debug)]
pub struct PoolAddresses {
    pub base_mint: Pubkey,
    pub base_token_program: Pubkey,
    pub quote_mint: Pubkey,
    pub quote_token_program: Pubkey,
    pub lp_mint: Pubkey,
    pub cp_amm: Pubkey,
    pub base_vault: Pubkey,
    pub quote_vault: Pubkey,
    pub locked_lp_vault: Pubkey,
}

impl PoolAddresses {
    pub fn derive(
        (base_mint, base_token_program): (Pubkey, Pubkey),
        (quote_mint, quote_token_program): (Pubkey, Pubkey),
        lp_mint: Pubkey,
    ) -> Self {
        let cp_amm = Pubkey::find_program_address(&[CpAmm::SEED, lp_mint.as_ref()], &liquidity_pool::ID).0;
        let vault = |mint: &Pubkey| {
            Pubkey::find_program_address(
                &[CpAmm::VAULT_SEED, cp_amm.as_ref(), mint.as_ref()],
                &liquidity_pool::ID,
            )
            .0
        };
        Self {
            base_mint,
            base_token_program,
            quote_mint,
            quote_token_program,
            lp_mint,
            cp_amm,
            base_vault: vault(&base_mint),
            quote_vault: vault(&quote_mint),
            locked_lp_vault: vault(&lp_mint),
        }
    }

    pub fn base_account_of(&self, owner: &Pubkey) -> Pubkey {
        get_associated_token_address_with_program_id(owner, &self.base_mint, &self.base_token_program)
    }

    pub fn quote_account_of(&self, owner: &Pubkey) -> Pubkey {
        get_associated_token_address_with_program_id(owner, &self.quote_mint, &self.quote_token_program)
    }

    pub fn lp_account_of(&self, owner: &Pubkey) -> Pubkey {
        get_associated_token_address_with_program_id(owner, &self.lp_mint, &LEGACY_TOKEN_PROGRAM)
    }
}

pub fn initialize_cp_amm_ix(
    signer: &Pubkey,
    pool: &PoolAddresses,
    amms_config: &Pubkey,
    fee_authority: &Pubkey,
) -> Instruction {
    Instruction {
        program_id: liquidity_pool::ID,
        accounts: liquidity_pool::accounts::InitializeCpAmm {
            signer: *signer,
            amms_configs_manager: manager_address(),
            amms_config: *amms_config,
            fee_authority: *fee_authority,
            base_mint: pool.base_mint,
            quote_mint: pool.quote_mint,
            cp_amm: pool.cp_amm,
            lp_mint: pool.lp_mint,
            cp_amm_base_vault: pool.base_vault,
            cp_amm_quote_vault: pool.quote_vault,
            cp_amm_locked_lp_vault: pool.locked_lp_vault,
            base_token_program: pool.base_token_program,
            quote_token_program: pool.quote_token_program,
            lp_token_program: LEGACY_TOKEN_PROGRAM,
            system_program: system_program::ID,
        }
        .to_account_metas(None),
        data: liquidity_pool::instruction::InitializeCpAmm {}.data(),
    }
}

pub fn launch_cp_amm_ix(
    signer: &Pubkey,
    pool: &PoolAddresses,
    base_liquidity: u64,
    quote_liquidity: u64,
) -> Instruction {
    Instruction {
        program_id: liquidity_pool::ID,
        accounts: liquidity_pool::accounts::LaunchCpAmm {
            signer: *signer,
            base_mint: pool.base_mint,
            quote_mint: pool.quote_mint,
            lp_mint: pool.lp_mint,
            signer_base_account: pool.base_account_of(signer),
            signer_quote_account: pool.quote_account_of(signer),
            signer_lp_account: pool.lp_account_of(signer),
            cp_amm: pool.cp_amm,
            cp_amm_base_vault: pool.base_vault,
            cp_amm_quote_vault: pool.quote_vault,
            cp_amm_locked_lp_vault: pool.locked_lp_vault,
            base_token_program: pool.base_token_program,
            quote_token_program: pool.quote_token_program,
            lp_token_program: LEGACY_TOKEN_PROGRAM,
            associated_token_program: spl_associated_token_account::ID,
            system_program: system_program::ID,
        }
        .to_account_metas(None),
        data: liquidity_pool::instruction::LaunchCpAmm {
            base_liquidity,
            quote_liquidity,
        }
        .data(),
    }
}

pub fn provide_to_cp_amm_ix(
    signer: &Pubkey,
    pool: &PoolAddresses,
    base_liquidity: u64,
    quote_liquidity: u64,
) -> Instruction {
    Instruction {
        program_id: liquidity_pool::ID,
        accounts: liquidity_pool::accounts::ProvideToCpAmm {
            signer: *signer,
            base_mint: pool.base_mint,
            quote_mint: pool.quote_mint,
            lp_mint: pool.lp_mint,
            signer_base_account: pool.base_account_of(signer),
            signer_quote_account: pool.quote_account_of(signer),
            signer_lp_account: pool.lp_account_of(signer),
            cp_amm: pool.cp_amm,
            cp_amm_base_vault: pool.base_vault,
            cp_amm_quote_vault: pool.quote_vault,
            base_token_program: pool.base_token_program,
            quote_token_program: pool.quote_token_program,
            lp_token_program: LEGACY_TOKEN_PROGRAM,
            associated_token_program: spl_associated_token_account::ID,
            system_program: system_program::ID,
        }
        .to_account_metas(None),
        data: liquidity_pool::instruction::ProvideToCpAmm {
            base_liquidity,
            quote_liquidity,
        }
        .data(),
    }
}

pub fn swap_in_cp_amm_ix(
    signer: &Pubkey,
    pool: &PoolAddresses,
    amms_config: &Pubkey,
    swap_amount: u64,
    estimated_result: u64,
    allowed_slippage: u64,
    is_in_out: bool,
) -> Instruction {
    Instruction {
        program_id: liquidity_pool::ID,
        accounts: liquidity_pool::accounts::SwapInCpAmm {
            signer: *signer,
            base_mint: pool.base_mint,
            quote_mint: pool.quote_mint,
            signer_base_account: pool.base_account_of(signer),
            signer_quote_account: pool.quote_account_of(signer),
            amms_config: *amms_config,
            cp_amm: pool.cp_amm,
            cp_amm_base_vault: pool.base_vault,
            cp_amm_quote_vault: pool.quote_vault,
            base_token_program: pool.base_token_program,
            quote_token_program: pool.quote_token_program,
            associated_token_program: spl_associated_token_account::ID,
            system_program: system_program::ID,
        }
        .to_account_metas(None),
        data: liquidity_pool::instruction::SwapInCpAmm {
            swap_amount,
            estimated_result,
            allowed_slippage,
            is_in_out,
        }
        .data(),
    }
}

pub fn collect_fees_from_cp_amm_ix(signer: &Pubkey, pool: &PoolAddresses, amms_config: &Pubkey) -> Instruction {
    Instruction {
        program_id: liquidity_pool::ID,
        accounts: liquidity_pool::accounts::CollectFeesFromCpAmm {
            signer: *signer,
            base_mint: pool.base_mint,
            quote_mint: pool.quote_mint,
            fee_authority_base_account: pool.base_account_of(signer),
            fee_authority_quote_account: pool.quote_account_of(signer),
            amms_config: *amms_config,
            cp_amm: pool.cp_amm,
            cp_amm_base_vault: pool.base_vault,
            cp_amm_quote_vault: pool.quote_vault,
            base_token_program: pool.base_token_program,
            quote_token_program: pool.quote_token_program,
            associated_token_program: spl_associated_token_account::ID,
            system_program: system_program::ID,
        }
        .to_account_metas(None),
        data: liquidity_pool::instruction::CollectFeesFromCpAmm {}.data(),
    }
}

pub fn withdraw_from_cp_amm_ix(signer: &Pubkey, pool: &PoolAddresses, lp_tokens: u64) -> Instruction {
    Instruction {
        program_id: liquidity_pool::ID,
        accounts: liquidity_pool::accounts::WithdrawFromCpAmm {
            signer: *signer,
            base_mint: pool.base_mint,
            quote_mint: pool.quote_mint,
            lp_mint: pool.lp_mint,
            signer_base_account: pool.base_account_of(signer),
            signer_quote_account: pool.quote_account_of(signer),
            signer_lp_account: pool.lp_account_of(signer),
            cp_amm: pool.cp_amm,
            cp_amm_base_vault: pool.base_vault,
            cp_amm_quote_vault: pool.quote_vault,
            base_token_program: pool.base_token_program,
            quote_token_program: pool.quote_token_program,
            lp_token_program: LEGACY_TOKEN_PROGRAM,
            associated_token_program: spl_associated_token_account::ID,
            system_program: system_program::ID,
        }
        .to_account_metas(None),
        data: liquidity_pool::instruction::WithdrawFromCpAmm { lp_tokens }.data(),
    }
}

/// Issues config `id`, which must equal the manager's current counter.
pub fn initialize_amms_config_ix(
    authority: &Pubkey,
    id: u64,
    fee_authority: &Pubkey,
    protocol_fee_rate_basis_points: u16,
    providers_fee_rate_basis_points: u16,
) -> Instruction {
    Instruction {
        program_id: liquidity_pool::ID,
        accounts: liquidity_pool::accounts::InitializeAmmsConfig {
            authority: *authority,
            amms_configs_manager: manager_address(),
            amms_config: config_address(id).0,
            fee_authority: *fee_authority,
            system_program: system_program::ID,
        }
        .to_account_metas(None),
        data: liquidity_pool::instruction::InitializeAmmsConfig {
            protocol_fee_rate_basis_points,
            providers_fee_rate_basis_points,
        }
        .data(),
    }
}

pub fn update_manager_authority_ix(signer: &Pubkey, new_authority: &Pubkey) -> Instruction {
    Instruction {
        program_id: liquidity_pool::ID,
        accounts: liquidity_pool::accounts::UpdateAmmsConfigsManagerAuthority {
            signer: *signer,
            amms_configs_manager: manager_address(),
            new_authority: *new_authority,
        }
        .to_account_metas(None),
        data: liquidity_pool::instruction::UpdateAmmsConfigsManagerAuthority {}.data(),
    }
}

pub fn update_manager_head_authority_ix(signer: &Pubkey, new_head_authority: &Pubkey) -> Instruction {
    Instruction {
        program_id: liquidity_pool::ID,
        accounts: liquidity_pool::accounts::UpdateAmmsConfigsManagerHeadAuthority {
            signer: *signer,
            amms_configs_manager: manager_address(),
            new_head_authority: *new_head_authority,
        }
        .to_account_metas(None),
        data: liquidity_pool::instruction::UpdateAmmsConfigsManagerHeadAuthority {}.data(),
    }
}

pub fn update_config_fee_authority_ix(
    authority: &Pubkey,
    amms_config: &Pubkey,
    new_fee_authority: &Pubkey,
) -> Instruction {
    Instruction {
        program_id: liquidity_pool::ID,
        accounts: liquidity_pool::accounts::UpdateAmmsConfigFeeAuthority {
            authority: *authority,
            amms_configs_manager: manager_address(),
            amms_config: *amms_config,
            new_fee_authority: *new_fee_authority,
        }
        .to_account_metas(None),
        data: liquidity_pool::instruction::UpdateAmmsConfigFeeAuthority {}.data(),
    }
}

pub fn update_config_protocol_fee_rate_ix(authority: &Pubkey, amms_config: &Pubkey, basis_points: u16) -> Instruction {
    Instruction {
        program_id: liquidity_pool::ID,
        accounts: liquidity_pool::accounts::UpdateAmmsConfigProtocolFeeRate {
            authority: *authority,
            amms_configs_manager: manager_address(),
            amms_config: *amms_config,
        }
        .to_account_metas(None),
        data: liquidity_pool::instruction::UpdateAmmsConfigProtocolFeeRate {
            new_protocol_fee_rate_basis_points: basis_points,
        }
        .data(),
    }
}

pub fn update_config_providers_fee_rate_ix(authority: &Pubkey, amms_config: &Pubkey, basis_points: u16) -> Instruction {
    Instruction {
        program_id: liquidity_pool::ID,
        accounts: liquidity_pool::accounts::UpdateAmmsConfigProvidersFeeRate {
            authority: *authority,
            amms_configs_manager: manager_address(),
            amms_config: *amms_config,
        }
        .to_account_metas(None),
        data: liquidity_pool::instruction::UpdateAmmsConfigProvidersFeeRate {
            new_providers_fee_rate_basis_points: basis_points,
        }
        .data(),
    }
}

/// Mint variations used to probe admission.
#[derive(Clone, Copy, Debug, Default)]
pub struct MintSetup {
    pub transfer_fee: Option<(u16, u64)>,
    pub freeze_authority: bool,
    pub permanent_delegate: bool,
}

/// Program running natively inside a bank, with the manager already claimed
/// by `head_authority` and config 0 issued through the program.
pub struct TestEnv {
    pub context: ProgramTestContext,
    pub head_authority: Keypair,
    pub fee_authority: Keypair,
    pub amms_config: Pubkey,
}

impl TestEnv {
    pub async fn start() -> Self {
        Self::start_with(|_| {}).await
    }

    /// `extra` may add accounts before the bank starts.
    pub async fn start_with(extra: impl FnOnce(&mut ProgramTest)) -> Self {
        let mut program_test = ProgramTest::new(
            "liquidity_pool",
            liquidity_pool::ID,
            processor!(process_instruction),
        );
        program_test.prefer_bpf(false);

        let head_authority = Keypair::new();
        let fee_authority = Keypair::new();
        let (manager, manager_bump) =
            Pubkey::find_program_address(&[AmmsConfigsManager::SEED], &liquidity_pool::ID);
        let mut manager_state = AmmsConfigsManager::default();
        manager_state
            .initialize(head_authority.pubkey(), head_authority.pubkey(), manager_bump)
            .unwrap();
        program_test.add_account(
            manager,
            program_owned(&manager_state, AmmsConfigsManager::INIT_SPACE, liquidity_pool::ID),
        );
        program_test.add_account(head_authority.pubkey(), wallet_account());
        program_test.add_account(fee_authority.pubkey(), wallet_account());
        extra(&mut program_test);

        let context = program_test.start_with_context().await;
        let mut env = Self {
            context,
            head_authority,
            fee_authority,
            amms_config: config_address(0).0,
        };

        let initialize_config = initialize_amms_config_ix(
            &env.head_authority.pubkey(),
            0,
            &env.fee_authority.pubkey(),
            PROTOCOL_FEE_BPS,
            PROVIDERS_FEE_BPS,
        );
        let head_authority = env.head_authority.insecure_clone();
        env.send(&[initialize_config], &[&head_authority]).await.unwrap();
        env
    }

    pub async fn send(
        &mut self,
        instructions: &[Instruction],
        signers: &[&Keypair],
    ) -> Result<(), BanksClientError> {
        let blockhash = self.context.get_new_latest_blockhash().await.unwrap();
        let mut all_signers: Vec<&Keypair> = vec![&self.context.payer];
        all_signers.extend_from_slice(signers);
        let transaction = Transaction::new_signed_with_payer(
            instructions,
            Some(&self.context.payer.pubkey()),
            &all_signers,
            blockhash,
        );
        self.context.banks_client.process_transaction(transaction).await
    }

    pub async fn funded_wallet(&mut self) -> Keypair {
        let wallet = Keypair::new();
        let transfer = system_instruction::transfer(
            &self.context.payer.pubkey(),
            &wallet.pubkey(),
            WALLET_LAMPORTS,
        );
        self.send(&[transfer], &[]).await.unwrap();
        wallet
    }

    /// Mint without a freeze authority, minted by the test payer.
    pub async fn create_mint(&mut self, token_program: Pubkey, transfer_fee: Option<(u16, u64)>) -> Pubkey {
        self.create_mint_with(
            token_program,
            MintSetup {
                transfer_fee,
                ..MintSetup::default()
            },
        )
        .await
    }

    pub async fn create_mint_with(&mut self, token_program: Pubkey, setup: MintSetup) -> Pubkey {
        let mint = Keypair::new();
        let payer = self.context.payer.pubkey();
        let mut extensions = Vec::new();
        if setup.transfer_fee.is_some() {
            extensions.push(ExtensionType::TransferFeeConfig);
        }
        if setup.permanent_delegate {
            extensions.push(ExtensionType::PermanentDelegate);
        }
        let space = if token_program == TOKEN_2022_PROGRAM {
            ExtensionType::try_calculate_account_len::<spl_token_2022::state::Mint>(&extensions).unwrap()
        } else {
            spl_token_2022::state::Mint::LEN
        };
        let rent = self.context.banks_client.get_rent().await.unwrap();

        let mut instructions = vec![system_instruction::create_account(
            &payer,
            &mint.pubkey(),
            rent.minimum_balance(space),
            space as u64,
            &token_program,
        )];
        if let Some((basis_points, maximum_fee)) = setup.transfer_fee {
            instructions.push(
                transfer_fee::instruction::initialize_transfer_fee_config(
                    &token_program,
                    &mint.pubkey(),
                    Some(&payer),
                    Some(&payer),
                    basis_points,
                    maximum_fee,
                )
                .unwrap(),
            );
        }
        if setup.permanent_delegate {
            instructions.push(
                spl_token_2022::instruction::initialize_permanent_delegate(
                    &token_program,
                    &mint.pubkey(),
                    &payer,
                )
                .unwrap(),
            );
        }
        let freeze_authority = setup.freeze_authority.then_some(payer);
        instructions.push(
            spl_token_2022::instruction::initialize_mint2(
                &token_program,
                &mint.pubkey(),
                &payer,
                freeze_authority.as_ref(),
                MINT_DECIMALS,
            )
            .unwrap(),
        );
        self.send(&instructions, &[&mint]).await.unwrap();
        mint.pubkey()
    }

    /// Creates `owner`'s empty associated account for `mint`.
    pub async fn create_token_account(&mut self, owner: &Pubkey, mint: &Pubkey, token_program: &Pubkey) -> Pubkey {
        let payer = self.context.payer.pubkey();
        let create = spl_associated_token_account::instruction::create_associated_token_account(
            &payer,
            owner,
            mint,
            token_program,
        );
        self.send(&[create], &[]).await.unwrap();
        get_associated_token_address_with_program_id(owner, mint, token_program)
    }

    /// Creates `owner`'s associated account for `mint` and mints `amount` into it.
    pub async fn fund_token_account(
        &mut self,
        owner: &Pubkey,
        mint: &Pubkey,
        token_program: &Pubkey,
        amount: u64,
    ) -> Pubkey {
        let payer = self.context.payer.pubkey();
        let address = get_associated_token_address_with_program_id(owner, mint, token_program);
        let instructions = [
            spl_associated_token_account::instruction::create_associated_token_account(
                &payer,
                owner,
                mint,
                token_program,
            ),
            spl_token_2022::instruction::mint_to(token_program, mint, &address, &payer, &[], amount)
                .unwrap(),
        ];
        self.send(&instructions, &[]).await.unwrap();
        address
    }

    /// Gives `owner` funded base and quote accounts for `pool`.
    pub async fn fund_trader(&mut self, owner: &Pubkey, pool: &PoolAddresses, base: u64, quote: u64) {
        self.fund_token_account(owner, &pool.base_mint, &pool.base_token_program, base)
            .await;
        self.fund_token_account(owner, &pool.quote_mint, &pool.quote_token_program, quote)
            .await;
    }

    /// Creates both mints and initializes a pool on config 0.
    pub async fn create_pool(
        &mut self,
        creator: &Keypair,
        base_token_program: Pubkey,
        quote: (Pubkey, Option<(u16, u64)>),
    ) -> PoolAddresses {
        let base_mint = self.create_mint(base_token_program, None).await;
        let quote_mint = self.create_mint(quote.0, quote.1).await;
        let lp_mint = Keypair::new();
        let pool = PoolAddresses::derive(
            (base_mint, base_token_program),
            (quote_mint, quote.0),
            lp_mint.pubkey(),
        );
        let amms_config = self.amms_config;
        let head_authority = self.head_authority.pubkey();
        self.send(
            &[initialize_cp_amm_ix(&creator.pubkey(), &pool, &amms_config, &head_authority)],
            &[creator, &lp_mint],
        )
        .await
        .unwrap();
        pool
    }

    pub async fn token_balance(&mut self, address: &Pubkey) -> u64 {
        let account = self
            .context
            .banks_client
            .get_account(*address)
            .await
            .unwrap()
            .expect("token account exists");
        StateWithExtensions::<spl_token_2022::state::Account>::unpack(&account.data)
            .unwrap()
            .base
            .amount
    }

    pub async fn lamports(&mut self, address: &Pubkey) -> u64 {
        self.context.banks_client.get_balance(*address).await.unwrap()
    }

    pub async fn account<T: AccountDeserialize>(&mut self, address: &Pubkey) -> T {
        let account = self
            .context
            .banks_client
            .get_account(*address)
            .await
            .unwrap()
            .expect("program account exists");
        T::try_deserialize(&mut account.data.as_slice()).unwrap()
    }

    pub async fn cp_amm(&mut self, address: &Pubkey) -> CpAmm {
        self.account(address).await
    }
}

/// Config account state for `id`, issued to `fee_authority`.
pub fn config_account(id: u64, fee_authority: Pubkey, owner: Pubkey) -> Account {
    let mut config = AmmsConfig::default();
    config
        .initialize(fee_authority, PROTOCOL_FEE_BPS, PROVIDERS_FEE_BPS, id, config_address(id).1)
        .unwrap();
    program_owned(&config, AmmsConfig::INIT_SPACE, owner)
}
