//! Interactive text session
//!
//! A menu loop over any `BufRead`/`Write` pair, driving a [`Bank`]. The
//! session only parses input and formats output; every rule about accounts
//! and balances lives in the store and the ledger. End of input ends the
//! session cleanly from any prompt.

use crate::core::{AccountSummary, Bank};
use crate::io::{history_table, money, parse_amount, user_message, write_statement_csv};
use crate::types::account::{validate_name, validate_pin, INITIAL_DEPOSIT_FIELD};
use crate::types::{AccountId, BankError};
use rust_decimal::Decimal;
use std::io::{BufRead, Write};

/// What the session does after a menu action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Logout,
    Exit,
}

/// Interactive session bound to one bank, one input and one output
pub struct Session<'a, B: Bank + ?Sized, R, W> {
    bank: &'a mut B,
    input: R,
    output: W,
}

impl<'a, B, R, W> Session<'a, B, R, W>
where
    B: Bank + ?Sized,
    R: BufRead,
    W: Write,
{
    pub fn new(bank: &'a mut B, input: R, output: W) -> Self {
        Session {
            bank,
            input,
            output,
        }
    }

    /// Run the welcome menu until the user exits or input ends
    ///
    /// # Errors
    ///
    /// Only I/O failures on the input or output are returned; rejected
    /// operations are reported to the user and the menu is shown again.
    pub fn run(&mut self) -> Result<(), BankError> {
        loop {
            writeln!(self.output, "\n===== WELCOME TO ATM SYSTEM =====")?;
            writeln!(self.output, "1. Login")?;
            writeln!(self.output, "2. Register")?;
            writeln!(self.output, "3. Exit")?;
            let Some(choice) = self.prompt("Enter your choice: ")? else {
                return Ok(());
            };

            let flow = match choice.as_str() {
                "1" => self.login()?,
                "2" => self.register()?,
                "3" => {
                    writeln!(self.output, "Thank you for using our ATM. Goodbye!")?;
                    Flow::Exit
                }
                other => {
                    self.invalid_choice(other, 3)?;
                    Flow::Continue
                }
            };

            if flow == Flow::Exit {
                return Ok(());
            }
        }
    }

    fn login(&mut self) -> Result<Flow, BankError> {
        writeln!(self.output, "\n===== ATM LOGIN =====")?;
        let Some(raw_id) = self.prompt("Enter User ID: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(pin) = self.prompt("Enter PIN: ")? else {
            return Ok(Flow::Exit);
        };

        let signed_in = AccountId::parse(&raw_id)
            .map_err(|_| BankError::Authentication)
            .and_then(|id| self.bank.sign_in(&id, &pin));

        match signed_in {
            Ok(account) => {
                writeln!(self.output, "\nLogin successful! Welcome, {}!", account.name)?;
                self.main_menu(&account.id)
            }
            Err(error) => {
                writeln!(self.output, "{}", user_message(&error))?;
                Ok(Flow::Continue)
            }
        }
    }

    fn register(&mut self) -> Result<Flow, BankError> {
        writeln!(self.output, "\n===== REGISTRATION =====")?;

        let Some(pin) = self.prompt("Enter PIN (4 digits): ")? else {
            return Ok(Flow::Exit);
        };
        if validate_pin(&pin).is_err() {
            writeln!(self.output, "PIN must be exactly 4 digits.")?;
            return Ok(Flow::Continue);
        }

        let Some(name) = self.prompt("Enter your full name: ")? else {
            return Ok(Flow::Exit);
        };
        if validate_name(&name).is_err() {
            writeln!(self.output, "Name cannot be empty.")?;
            return Ok(Flow::Continue);
        }

        let Some(raw_amount) = self.prompt("Enter initial deposit amount: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(initial_deposit) = parse_amount(&raw_amount) else {
            writeln!(self.output, "Invalid amount. Please enter a valid number.")?;
            return Ok(Flow::Continue);
        };

        match self.bank.open_account(&pin, &name, initial_deposit) {
            Ok(account) => {
                writeln!(self.output, "\nRegistration successful!")?;
                writeln!(self.output, "Please note your User ID: {}", account.id)?;
                writeln!(self.output, "Your current balance: {}", money(account.balance))?;
            }
            Err(BankError::Validation { field, reason }) if field == INITIAL_DEPOSIT_FIELD => {
                writeln!(self.output, "Initial deposit {}.", reason)?;
            }
            Err(error) => {
                writeln!(self.output, "{}", user_message(&error))?;
            }
        }
        Ok(Flow::Continue)
    }

    fn main_menu(&mut self, id: &AccountId) -> Result<Flow, BankError> {
        loop {
            writeln!(self.output, "\n===== MAIN MENU =====")?;
            writeln!(self.output, "1. Transactions History")?;
            writeln!(self.output, "2. Withdraw")?;
            writeln!(self.output, "3. Deposit")?;
            writeln!(self.output, "4. Transfer")?;
            writeln!(self.output, "5. Export History (CSV)")?;
            writeln!(self.output, "6. Quit")?;
            let Some(choice) = self.prompt("Enter your choice: ")? else {
                return Ok(Flow::Exit);
            };

            let flow = match choice.as_str() {
                "1" => self.show_history(id)?,
                "2" => self.withdraw(id)?,
                "3" => self.deposit(id)?,
                "4" => self.transfer(id)?,
                "5" => self.export_history(id)?,
                "6" => {
                    writeln!(self.output, "Logged out successfully.")?;
                    Flow::Logout
                }
                other => {
                    self.invalid_choice(other, 6)?;
                    Flow::Continue
                }
            };

            match flow {
                Flow::Continue => {}
                Flow::Logout => return Ok(Flow::Continue),
                Flow::Exit => return Ok(Flow::Exit),
            }
        }
    }

    fn show_history(&mut self, id: &AccountId) -> Result<Flow, BankError> {
        writeln!(self.output, "\n===== TRANSACTION HISTORY =====")?;
        match self.bank.statement(id) {
            Ok(transactions) => write!(self.output, "{}", history_table(&transactions))?,
            Err(error) => writeln!(self.output, "{}", user_message(&error))?,
        }
        Ok(Flow::Continue)
    }

    fn export_history(&mut self, id: &AccountId) -> Result<Flow, BankError> {
        match self.bank.statement(id) {
            Ok(transactions) => write_statement_csv(&transactions, &mut self.output)?,
            Err(error) => writeln!(self.output, "{}", user_message(&error))?,
        }
        Ok(Flow::Continue)
    }

    fn withdraw(&mut self, id: &AccountId) -> Result<Flow, BankError> {
        writeln!(self.output, "\n===== WITHDRAW =====")?;
        let Some(amount) = self.prompt_amount("Enter amount to withdraw: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(amount) = amount else {
            return Ok(Flow::Continue);
        };

        match self.bank.withdraw_from(id, amount) {
            Ok(balance) => writeln!(
                self.output,
                "Successfully withdrew {}. New balance: {}",
                money(amount),
                money(balance)
            )?,
            Err(error) => writeln!(self.output, "{}", user_message(&error))?,
        }
        Ok(Flow::Continue)
    }

    fn deposit(&mut self, id: &AccountId) -> Result<Flow, BankError> {
        writeln!(self.output, "\n===== DEPOSIT =====")?;
        let Some(amount) = self.prompt_amount("Enter amount to deposit: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(amount) = amount else {
            return Ok(Flow::Continue);
        };

        match self.bank.deposit_to(id, amount) {
            Ok(balance) => writeln!(
                self.output,
                "Successfully deposited {}. New balance: {}",
                money(amount),
                money(balance)
            )?,
            Err(error) => writeln!(self.output, "{}", user_message(&error))?,
        }
        Ok(Flow::Continue)
    }

    fn transfer(&mut self, id: &AccountId) -> Result<Flow, BankError> {
        writeln!(self.output, "\n===== TRANSFER =====")?;
        let Some(raw_recipient) = self.prompt("Enter recipient's User ID: ")? else {
            return Ok(Flow::Exit);
        };

        // Recipient is checked before asking for an amount
        let recipient: Option<AccountSummary> = AccountId::parse(&raw_recipient)
            .ok()
            .and_then(|recipient| self.bank.summary(&recipient));
        let Some(recipient) = recipient else {
            writeln!(self.output, "Recipient not found.")?;
            return Ok(Flow::Continue);
        };
        if &recipient.id == id {
            writeln!(self.output, "Cannot transfer to yourself.")?;
            return Ok(Flow::Continue);
        }

        let Some(amount) = self.prompt_amount("Enter amount to transfer: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(amount) = amount else {
            return Ok(Flow::Continue);
        };

        match self.bank.transfer_between(id, &recipient.id, amount) {
            Ok(balance) => writeln!(
                self.output,
                "Successfully transferred {} to {} ({}). New balance: {}",
                money(amount),
                recipient.name,
                recipient.id,
                money(balance)
            )?,
            Err(error) => writeln!(self.output, "{}", user_message(&error))?,
        }
        Ok(Flow::Continue)
    }

    /// Prompt for an amount
    ///
    /// Outer `None` means input ended; inner `None` means the entry was not a
    /// number and the user has already been told.
    fn prompt_amount(&mut self, text: &str) -> Result<Option<Option<Decimal>>, BankError> {
        let Some(raw) = self.prompt(text)? else {
            return Ok(None);
        };
        match parse_amount(&raw) {
            Some(amount) => Ok(Some(Some(amount))),
            None => {
                writeln!(self.output, "Invalid amount. Please enter a valid number.")?;
                Ok(Some(None))
            }
        }
    }

    fn invalid_choice(&mut self, choice: &str, options: u32) -> Result<(), BankError> {
        if choice.parse::<u32>().is_ok() {
            writeln!(self.output, "Invalid choice. Please try again.")?;
        } else {
            writeln!(self.output, "Please enter a valid number (1-{}).", options)?;
        }
        Ok(())
    }

    /// Print a prompt and read one trimmed line, `None` at end of input
    fn prompt(&mut self, text: &str) -> Result<Option<String>, BankError> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
