/// Transaction types for ledgerchain
use std::fmt;

/// Width of the underscore rule printed above each transaction.
pub const TRANSACTION_RULE_WIDTH: usize = 25;

/// A single value transfer between two opaque addresses.
///
/// Fields are private so a transaction cannot change after it enters the pool.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transaction {
    sender: String,
    recipient: String,
    amount: f64,
}

impl Transaction {
    pub fn new(sender: impl Into<String>, recipient: impl Into<String>, amount: f64) -> Self {
        Transaction {
            sender: sender.into(),
            recipient: recipient.into(),
            amount,
        }
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Fields in the order the block digest consumes them.
    pub fn canonical_fields(&self) -> (&str, &str, f64) {
        (&self.sender, &self.recipient, self.amount)
    }

    /// Appends the canonical encoding of this transaction to `out`.
    ///
    /// Strings are length-prefixed (u64, little-endian) so that moving bytes
    /// between sender and recipient always yields a different encoding.
    pub fn encode_canonical(&self, out: &mut Vec<u8>) {
        let (sender, recipient, amount) = self.canonical_fields();
        out.extend_from_slice(&(sender.len() as u64).to_le_bytes());
        out.extend_from_slice(sender.as_bytes());
        out.extend_from_slice(&(recipient.len() as u64).to_le_bytes());
        out.extend_from_slice(recipient.as_bytes());
        out.extend_from_slice(&amount.to_le_bytes());
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", "_".repeat(TRANSACTION_RULE_WIDTH))?;
        writeln!(f, "Sender Blockchain Address:           {}", self.sender)?;
        writeln!(f, "Recipient Blockchain Address:        {}", self.recipient)?;
        writeln!(f, "Value:                               {:.1}", self.amount)
    }
}
