//! Solidity source generation for owner-managed tokens.
//!
//! Turns a validated [`TokenSpec`] into the complete source text of a
//! fixed-supply, pausable, blacklistable token contract. Generation is
//! deterministic: the same spec always produces byte-identical output,
//! with no timestamps and no randomness.
//!
//! The symbol doubles as the contract identifier, so it is interpolated
//! into declaration position. The generator refuses any symbol that is not
//! a plain identifier and escapes the display name before embedding it,
//! rather than trusting callers to have sanitized their inputs.

use thiserror::Error;

/// Highest supported decimal precision, matching the 18-decimal convention
/// of the chain's native unit.
pub const MAX_DECIMALS: u8 = 18;

/// Parameters of a token contract to generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSpec {
    /// Display name, embedded as a string literal
    pub name: String,
    /// Ticker symbol; also the contract identifier
    pub symbol: String,
    /// Decimal precision, 0 to 18 inclusive
    pub decimals: u8,
}

impl TokenSpec {
    /// Create a spec, rejecting parameters the generator cannot safely
    /// embed.
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        decimals: u8,
    ) -> Result<Self, TemplateError> {
        let spec = Self {
            name: name.into(),
            symbol: symbol.into(),
            decimals,
        };
        spec.validate()?;
        Ok(spec)
    }

    /// Validate all parameters without generating.
    pub fn validate(&self) -> Result<(), TemplateError> {
        if self.name.trim().is_empty() {
            return Err(TemplateError::EmptyName);
        }
        if !is_valid_identifier(&self.symbol) {
            return Err(TemplateError::InvalidSymbol(self.symbol.clone()));
        }
        if self.decimals > MAX_DECIMALS {
            return Err(TemplateError::DecimalsOutOfRange(self.decimals));
        }
        Ok(())
    }
}

/// Parameter rejection reasons.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("token name must not be empty")]
    EmptyName,

    #[error("token symbol {0:?} is not a valid contract identifier")]
    InvalidSymbol(String),

    #[error("decimals must be between 0 and {MAX_DECIMALS}, got {0}")]
    DecimalsOutOfRange(u8),
}

/// Generate the contract source for `spec`.
///
/// Pure and deterministic; re-validates the spec so an unvalidated value
/// constructed by hand cannot reach the interpolation step.
pub fn generate(spec: &TokenSpec) -> Result<String, TemplateError> {
    spec.validate()?;

    // Name is substituted first: the later substitutions only introduce
    // identifier characters and digits, so escaped name content can never
    // break out of its string literal.
    Ok(CONTRACT_TEMPLATE
        .replace("__NAME__", &escape_string_literal(&spec.name))
        .replace("__DECIMALS__", &spec.decimals.to_string())
        .replace("__SYMBOL__", &spec.symbol))
}

fn is_valid_identifier(symbol: &str) -> bool {
    let mut chars = symbol.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Escape a display name for embedding in a double-quoted source literal.
fn escape_string_literal(name: &str) -> String {
    let mut escaped = String::with_capacity(name.len());
    for c in name.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            other => escaped.push(other),
        }
    }
    escaped
}

const CONTRACT_TEMPLATE: &str = r#"// SPDX-License-Identifier: MIT
pragma solidity ^0.8.0;

contract __SYMBOL__ {
    string public name = "__NAME__";
    string public symbol = "__SYMBOL__";
    uint8 public constant decimals = __DECIMALS__;

    uint256 public constant INITIAL_SUPPLY = 10_000_000 * (10 ** uint256(decimals));
    uint256 public totalSupply;

    mapping(address => uint256) private _balances;
    mapping(address => mapping(address => uint256)) private _allowances;
    mapping(address => bool) private _blacklist;

    address public owner;
    bool public paused;

    event Transfer(address indexed from, address indexed to, uint256 value);
    event Approval(address indexed owner, address indexed spender, uint256 value);
    event Paused(address account);
    event Unpaused(address account);
    event OwnershipTransferred(address indexed previousOwner, address indexed newOwner);
    event Blacklisted(address indexed account);
    event Unblacklisted(address indexed account);
    event Mint(address indexed to, uint256 amount);
    event Burn(address indexed from, uint256 amount);

    modifier onlyOwner() {
        require(msg.sender == owner, "__SYMBOL__: caller is not the owner");
        _;
    }

    modifier whenNotPaused() {
        require(!paused, "__SYMBOL__: paused");
        _;
    }

    modifier whenPaused() {
        require(paused, "__SYMBOL__: not paused");
        _;
    }

    modifier notBlacklisted(address account) {
        require(!_blacklist[account], "__SYMBOL__: account is blacklisted");
        _;
    }

    constructor() {
        owner = msg.sender;
        totalSupply = INITIAL_SUPPLY;
        _balances[owner] = INITIAL_SUPPLY;
        paused = false;
        emit Transfer(address(0), owner, INITIAL_SUPPLY);
        emit OwnershipTransferred(address(0), owner);
    }

    function balanceOf(address account) external view returns (uint256) {
        return _balances[account];
    }

    function allowance(address tokenOwner, address spender) external view returns (uint256) {
        return _allowances[tokenOwner][spender];
    }

    function isBlacklisted(address account) external view returns (bool) {
        return _blacklist[account];
    }

    function transfer(address to, uint256 amount) external whenNotPaused notBlacklisted(msg.sender) notBlacklisted(to) returns (bool) {
        _transfer(msg.sender, to, amount);
        return true;
    }

    function approve(address spender, uint256 amount) external whenNotPaused returns (bool) {
        _approve(msg.sender, spender, amount);
        return true;
    }

    function transferFrom(address from, address to, uint256 amount) external whenNotPaused notBlacklisted(from) notBlacklisted(to) returns (bool) {
        uint256 currentAllowance = _allowances[from][msg.sender];
        require(currentAllowance >= amount, "__SYMBOL__: transfer amount exceeds allowance");
        _approve(from, msg.sender, currentAllowance - amount);
        _transfer(from, to, amount);
        return true;
    }

    function increaseAllowance(address spender, uint256 addedValue) external whenNotPaused returns (bool) {
        _approve(msg.sender, spender, _allowances[msg.sender][spender] + addedValue);
        return true;
    }

    function decreaseAllowance(address spender, uint256 subtractedValue) external whenNotPaused returns (bool) {
        uint256 current = _allowances[msg.sender][spender];
        require(current >= subtractedValue, "__SYMBOL__: decreased allowance below zero");
        _approve(msg.sender, spender, current - subtractedValue);
        return true;
    }

    function _transfer(address from, address to, uint256 amount) internal {
        require(from != address(0), "__SYMBOL__: transfer from the zero address");
        require(to != address(0), "__SYMBOL__: transfer to the zero address");
        uint256 fromBalance = _balances[from];
        require(fromBalance >= amount, "__SYMBOL__: transfer amount exceeds balance");
        _balances[from] = fromBalance - amount;
        _balances[to] += amount;
        emit Transfer(from, to, amount);
    }

    function _approve(address tokenOwner, address spender, uint256 amount) internal {
        require(tokenOwner != address(0), "__SYMBOL__: approve from the zero address");
        require(spender != address(0), "__SYMBOL__: approve to the zero address");
        _allowances[tokenOwner][spender] = amount;
        emit Approval(tokenOwner, spender, amount);
    }

    function pause() external onlyOwner whenNotPaused {
        paused = true;
        emit Paused(msg.sender);
    }

    function unpause() external onlyOwner whenPaused {
        paused = false;
        emit Unpaused(msg.sender);
    }

    function blacklist(address account) external onlyOwner {
        require(account != owner, "__SYMBOL__: cannot blacklist owner");
        _blacklist[account] = true;
        emit Blacklisted(account);
    }

    function unblacklist(address account) external onlyOwner {
        _blacklist[account] = false;
        emit Unblacklisted(account);
    }

    function mint(address to, uint256 amount) external onlyOwner {
        require(to != address(0), "__SYMBOL__: mint to the zero address");
        totalSupply += amount;
        _balances[to] += amount;
        emit Mint(to, amount);
        emit Transfer(address(0), to, amount);
    }

    function burn(uint256 amount) external onlyOwner {
        uint256 accountBalance = _balances[msg.sender];
        require(accountBalance >= amount, "__SYMBOL__: burn amount exceeds balance");
        _balances[msg.sender] = accountBalance - amount;
        totalSupply -= amount;
        emit Burn(msg.sender, amount);
        emit Transfer(msg.sender, address(0), amount);
    }

    function transferOwnership(address newOwner) external onlyOwner {
        require(newOwner != address(0), "__SYMBOL__: new owner is zero address");
        emit OwnershipTransferred(owner, newOwner);
        owner = newOwner;
    }

    function renounceOwnership() external onlyOwner {
        emit OwnershipTransferred(owner, address(0));
        owner = address(0);
    }
}
"#;
