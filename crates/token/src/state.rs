use crate::types::{TokenError, TokenEvent};
use alloy_primitives::{Address, U256};
use std::collections::{HashMap, HashSet};

/// Initial supply in whole tokens, before decimal scaling.
pub const INITIAL_SUPPLY_TOKENS: u64 = 10_000_000;

/// Initial supply for a token with the given decimal precision.
pub fn initial_supply(decimals: u8) -> U256 {
    U256::from(INITIAL_SUPPLY_TOKENS) * U256::from(10u64).pow(U256::from(decimals))
}

/// Explicit state of a deployed token contract.
///
/// State is mutated exclusively through the transition methods, each of
/// which takes the calling address explicitly (the `msg.sender` of the
/// corresponding contract call). A transition either succeeds, mutating
/// state and returning the events the contract would emit in order, or
/// fails with a [`TokenError`] leaving the state untouched: every guard
/// runs before the first write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenState {
    name: String,
    symbol: String,
    decimals: u8,
    owner: Address,
    paused: bool,
    total_supply: U256,
    balances: HashMap<Address, U256>,
    allowances: HashMap<(Address, Address), U256>,
    blacklist: HashSet<Address>,
}

impl TokenState {
    /// Deploy a new token: the deployer becomes the owner and receives the
    /// full initial supply of `10,000,000 * 10^decimals` base units.
    pub fn deploy(
        deployer: Address,
        name: impl Into<String>,
        symbol: impl Into<String>,
        decimals: u8,
    ) -> (Self, Vec<TokenEvent>) {
        let supply = initial_supply(decimals);
        let mut balances = HashMap::new();
        balances.insert(deployer, supply);

        let state = Self {
            name: name.into(),
            symbol: symbol.into(),
            decimals,
            owner: deployer,
            paused: false,
            total_supply: supply,
            balances,
            allowances: HashMap::new(),
            blacklist: HashSet::new(),
        };
        let events = vec![
            TokenEvent::Transfer {
                from: Address::ZERO,
                to: deployer,
                value: supply,
            },
            TokenEvent::OwnershipTransferred {
                previous_owner: Address::ZERO,
                new_owner: deployer,
            },
        ];
        (state, events)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub const fn decimals(&self) -> u8 {
        self.decimals
    }

    /// Current owner; the zero address once ownership has been renounced.
    pub const fn owner(&self) -> Address {
        self.owner
    }

    pub const fn paused(&self) -> bool {
        self.paused
    }

    pub const fn total_supply(&self) -> U256 {
        self.total_supply
    }

    pub fn balance_of(&self, account: Address) -> U256 {
        self.balances.get(&account).copied().unwrap_or_default()
    }

    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.allowances
            .get(&(owner, spender))
            .copied()
            .unwrap_or_default()
    }

    pub fn is_blacklisted(&self, account: Address) -> bool {
        self.blacklist.contains(&account)
    }

    /// Sum of all balances. Equals [`Self::total_supply`] after every
    /// transition; exposed so audits can check the invariant directly.
    pub fn balances_total(&self) -> U256 {
        self.balances.values().copied().sum()
    }

    /// Move `amount` from the caller to `to`.
    pub fn transfer(
        &mut self,
        caller: Address,
        to: Address,
        amount: U256,
    ) -> Result<Vec<TokenEvent>, TokenError> {
        self.ensure_not_paused()?;
        self.ensure_not_blacklisted(caller)?;
        self.ensure_not_blacklisted(to)?;
        self.move_balance(caller, to, amount)
    }

    /// Set the allowance granted by the caller to `spender`.
    pub fn approve(
        &mut self,
        caller: Address,
        spender: Address,
        amount: U256,
    ) -> Result<Vec<TokenEvent>, TokenError> {
        self.ensure_not_paused()?;
        self.set_allowance(caller, spender, amount)
    }

    /// Move `amount` from `from` to `to` using the caller's allowance.
    ///
    /// Emits `Approval` for the reduced allowance and then `Transfer`, as
    /// the contract does.
    pub fn transfer_from(
        &mut self,
        caller: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<Vec<TokenEvent>, TokenError> {
        self.ensure_not_paused()?;
        self.ensure_not_blacklisted(from)?;
        self.ensure_not_blacklisted(to)?;

        let current = self.allowance(from, caller);
        if current < amount {
            return Err(TokenError::InsufficientAllowance);
        }

        // The balance-move guards run before the allowance write so a
        // failed move leaves the allowance untouched (on-chain the whole
        // call reverts together).
        if from == Address::ZERO || to == Address::ZERO {
            return Err(TokenError::ZeroAddress);
        }
        if self.balance_of(from) < amount {
            return Err(TokenError::InsufficientBalance);
        }

        let mut events = self.set_allowance(from, caller, current - amount)?;
        events.extend(self.move_balance(from, to, amount)?);
        Ok(events)
    }

    /// Raise the caller's allowance to `spender` by `added_value`.
    pub fn increase_allowance(
        &mut self,
        caller: Address,
        spender: Address,
        added_value: U256,
    ) -> Result<Vec<TokenEvent>, TokenError> {
        self.ensure_not_paused()?;
        let current = self.allowance(caller, spender);
        let raised = current
            .checked_add(added_value)
            .ok_or(TokenError::Overflow)?;
        self.set_allowance(caller, spender, raised)
    }

    /// Lower the caller's allowance to `spender` by `subtracted_value`.
    pub fn decrease_allowance(
        &mut self,
        caller: Address,
        spender: Address,
        subtracted_value: U256,
    ) -> Result<Vec<TokenEvent>, TokenError> {
        self.ensure_not_paused()?;
        let current = self.allowance(caller, spender);
        if current < subtracted_value {
            return Err(TokenError::AllowanceUnderflow);
        }
        self.set_allowance(caller, spender, current - subtracted_value)
    }

    /// Halt transfers and allowance changes. Owner only.
    pub fn pause(&mut self, caller: Address) -> Result<Vec<TokenEvent>, TokenError> {
        self.ensure_owner(caller)?;
        if self.paused {
            return Err(TokenError::AlreadyPaused);
        }
        self.paused = true;
        Ok(vec![TokenEvent::Paused { account: caller }])
    }

    /// Resume transfers. Owner only.
    pub fn unpause(&mut self, caller: Address) -> Result<Vec<TokenEvent>, TokenError> {
        self.ensure_owner(caller)?;
        if !self.paused {
            return Err(TokenError::NotPaused);
        }
        self.paused = false;
        Ok(vec![TokenEvent::Unpaused { account: caller }])
    }

    /// Bar `account` from transfer participation. Owner only; callable
    /// while paused.
    pub fn blacklist(
        &mut self,
        caller: Address,
        account: Address,
    ) -> Result<Vec<TokenEvent>, TokenError> {
        self.ensure_owner(caller)?;
        if account == self.owner {
            return Err(TokenError::CannotBlacklistOwner);
        }
        self.blacklist.insert(account);
        Ok(vec![TokenEvent::Blacklisted { account }])
    }

    /// Re-admit `account`. Owner only; emits even when the entry was
    /// already clear, matching the contract.
    pub fn unblacklist(
        &mut self,
        caller: Address,
        account: Address,
    ) -> Result<Vec<TokenEvent>, TokenError> {
        self.ensure_owner(caller)?;
        self.blacklist.remove(&account);
        Ok(vec![TokenEvent::Unblacklisted { account }])
    }

    /// Create `amount` new base units for `to`. Owner only; callable while
    /// paused. Emits `Mint` and the conventional from-zero `Transfer`.
    pub fn mint(
        &mut self,
        caller: Address,
        to: Address,
        amount: U256,
    ) -> Result<Vec<TokenEvent>, TokenError> {
        self.ensure_owner(caller)?;
        if to == Address::ZERO {
            return Err(TokenError::ZeroAddress);
        }
        let raised_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;

        self.total_supply = raised_supply;
        let balance = self.balance_of(to);
        self.balances.insert(to, balance + amount);
        Ok(vec![
            TokenEvent::Mint { to, amount },
            TokenEvent::Transfer {
                from: Address::ZERO,
                to,
                value: amount,
            },
        ])
    }

    /// Destroy `amount` base units from the owner's balance. Owner only.
    /// Emits `Burn` and the conventional to-zero `Transfer`.
    pub fn burn(&mut self, caller: Address, amount: U256) -> Result<Vec<TokenEvent>, TokenError> {
        self.ensure_owner(caller)?;
        let balance = self.balance_of(caller);
        if balance < amount {
            return Err(TokenError::InsufficientBalance);
        }

        self.balances.insert(caller, balance - amount);
        self.total_supply -= amount;
        Ok(vec![
            TokenEvent::Burn {
                from: caller,
                amount,
            },
            TokenEvent::Transfer {
                from: caller,
                to: Address::ZERO,
                value: amount,
            },
        ])
    }

    /// Hand ownership to `new_owner`. Owner only.
    ///
    /// A blacklisted recipient is refused: a blacklisted owner would break
    /// the owner/blacklist exclusion that `blacklist` enforces.
    pub fn transfer_ownership(
        &mut self,
        caller: Address,
        new_owner: Address,
    ) -> Result<Vec<TokenEvent>, TokenError> {
        self.ensure_owner(caller)?;
        if new_owner == Address::ZERO {
            return Err(TokenError::ZeroAddress);
        }
        if self.blacklist.contains(&new_owner) {
            return Err(TokenError::Blacklisted);
        }
        let previous_owner = self.owner;
        self.owner = new_owner;
        Ok(vec![TokenEvent::OwnershipTransferred {
            previous_owner,
            new_owner,
        }])
    }

    /// Give up ownership permanently. Owner only. After this no
    /// owner-gated transition is reachable again.
    pub fn renounce_ownership(&mut self, caller: Address) -> Result<Vec<TokenEvent>, TokenError> {
        self.ensure_owner(caller)?;
        let previous_owner = self.owner;
        self.owner = Address::ZERO;
        Ok(vec![TokenEvent::OwnershipTransferred {
            previous_owner,
            new_owner: Address::ZERO,
        }])
    }

    fn ensure_owner(&self, caller: Address) -> Result<(), TokenError> {
        // After renouncement the owner is the zero address; no transaction
        // can originate from it, so the gate stays closed permanently even
        // for a zero caller constructed in a simulation.
        if self.owner == Address::ZERO || caller != self.owner {
            return Err(TokenError::NotOwner);
        }
        Ok(())
    }

    fn ensure_not_paused(&self) -> Result<(), TokenError> {
        if self.paused {
            return Err(TokenError::Paused);
        }
        Ok(())
    }

    fn ensure_not_blacklisted(&self, account: Address) -> Result<(), TokenError> {
        if self.blacklist.contains(&account) {
            return Err(TokenError::Blacklisted);
        }
        Ok(())
    }

    fn move_balance(
        &mut self,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<Vec<TokenEvent>, TokenError> {
        if from == Address::ZERO || to == Address::ZERO {
            return Err(TokenError::ZeroAddress);
        }
        let from_balance = self.balance_of(from);
        if from_balance < amount {
            return Err(TokenError::InsufficientBalance);
        }

        self.balances.insert(from, from_balance - amount);
        // Re-read so a self-transfer credits the debited balance.
        let to_balance = self.balance_of(to);
        self.balances.insert(to, to_balance + amount);
        Ok(vec![TokenEvent::Transfer {
            from,
            to,
            value: amount,
        }])
    }

    fn set_allowance(
        &mut self,
        owner: Address,
        spender: Address,
        amount: U256,
    ) -> Result<Vec<TokenEvent>, TokenError> {
        if owner == Address::ZERO || spender == Address::ZERO {
            return Err(TokenError::ZeroAddress);
        }
        self.allowances.insert((owner, spender), amount);
        Ok(vec![TokenEvent::Approval {
            owner,
            spender,
            value: amount,
        }])
    }
}
