//! # Menu Commands
//!
//! Parses one input line into a [`MenuCommand`].
//!
//! Keys are case-insensitive and surrounding whitespace is ignored.
//! `create` and `list` are shorthands for the voucher commands.

use std::fmt;
use std::str::FromStr;

use crate::error::ConsoleError;

/// A command selected at the main prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    CreateVoucher,
    ListVouchers,
    UpdateVoucher,
    DeleteVoucher,
    ApplyDiscount,
    CreateCustomer,
    ListCustomers,
    FindCustomer,
    RenameCustomer,
    DeleteCustomer,
    Help,
    Exit,
}

impl MenuCommand {
    /// Every command, in menu order.
    pub const ALL: [MenuCommand; 12] = [
        MenuCommand::CreateVoucher,
        MenuCommand::ListVouchers,
        MenuCommand::UpdateVoucher,
        MenuCommand::DeleteVoucher,
        MenuCommand::ApplyDiscount,
        MenuCommand::CreateCustomer,
        MenuCommand::ListCustomers,
        MenuCommand::FindCustomer,
        MenuCommand::RenameCustomer,
        MenuCommand::DeleteCustomer,
        MenuCommand::Help,
        MenuCommand::Exit,
    ];

    /// The key typed to select this command.
    pub const fn key(&self) -> &'static str {
        match self {
            MenuCommand::CreateVoucher => "voucher create",
            MenuCommand::ListVouchers => "voucher list",
            MenuCommand::UpdateVoucher => "voucher update",
            MenuCommand::DeleteVoucher => "voucher delete",
            MenuCommand::ApplyDiscount => "voucher discount",
            MenuCommand::CreateCustomer => "customer create",
            MenuCommand::ListCustomers => "customer list",
            MenuCommand::FindCustomer => "customer find",
            MenuCommand::RenameCustomer => "customer rename",
            MenuCommand::DeleteCustomer => "customer delete",
            MenuCommand::Help => "help",
            MenuCommand::Exit => "exit",
        }
    }

    /// One-line description shown in the menu.
    pub const fn description(&self) -> &'static str {
        match self {
            MenuCommand::CreateVoucher => "Create a new voucher (shorthand: create)",
            MenuCommand::ListVouchers => "List all vouchers (shorthand: list)",
            MenuCommand::UpdateVoucher => "Change a voucher's discount amount",
            MenuCommand::DeleteVoucher => "Delete a voucher by id",
            MenuCommand::ApplyDiscount => "Apply a voucher to a purchase amount",
            MenuCommand::CreateCustomer => "Register a customer",
            MenuCommand::ListCustomers => "List all customers",
            MenuCommand::FindCustomer => "Find a customer by name",
            MenuCommand::RenameCustomer => "Rename a customer",
            MenuCommand::DeleteCustomer => "Delete a customer by id or name",
            MenuCommand::Help => "Show this menu",
            MenuCommand::Exit => "Exit the program",
        }
    }

    /// Renders the full menu.
    pub fn menu() -> String {
        let mut menu = String::from("=== Voucher Program ===\n");
        for command in MenuCommand::ALL {
            menu.push_str(&format!("  {:<18} {}\n", command.key(), command.description()));
        }
        menu
    }
}

impl fmt::Display for MenuCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for MenuCommand {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s
            .split_whitespace()
            .map(str::to_ascii_lowercase)
            .collect::<Vec<_>>()
            .join(" ");

        let command = match normalized.as_str() {
            "create" => MenuCommand::CreateVoucher,
            "list" => MenuCommand::ListVouchers,
            key => MenuCommand::ALL
                .into_iter()
                .find(|command| command.key() == key)
                .ok_or_else(|| ConsoleError::unknown_command(s.trim()))?,
        };
        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_parse_two_word_keys() {
        for command in MenuCommand::ALL {
            assert_eq!(command.key().parse::<MenuCommand>().unwrap(), command);
        }
    }

    #[test]
    fn test_parse_shorthands() {
        assert_eq!("create".parse::<MenuCommand>().unwrap(), MenuCommand::CreateVoucher);
        assert_eq!("list".parse::<MenuCommand>().unwrap(), MenuCommand::ListVouchers);
    }

    #[test]
    fn test_parse_is_lenient_about_case_and_spacing() {
        assert_eq!(
            "  Voucher   LIST ".parse::<MenuCommand>().unwrap(),
            MenuCommand::ListVouchers
        );
        assert_eq!("EXIT".parse::<MenuCommand>().unwrap(), MenuCommand::Exit);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "voucher explode".parse::<MenuCommand>().unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownCommand);
        assert!(err.message.contains("voucher explode"));
    }

    #[test]
    fn test_menu_lists_every_key() {
        let menu = MenuCommand::menu();
        for command in MenuCommand::ALL {
            assert!(menu.contains(command.key()));
        }
    }
}
