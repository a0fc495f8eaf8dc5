//! Programmable transaction blocks.
//!
//! A block is a list of inputs (pure values or object references) and a list
//! of commands that refer to those inputs, to the gas coin, or to results of
//! earlier commands.

use collabsplit_types::ObjectId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LedgerError;

/// A fully qualified Move function: `package::module::function`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MoveTarget {
    pub package: String,
    pub module: String,
    pub function: String,
}

impl MoveTarget {
    pub fn new(
        package: impl Into<String>,
        module: impl Into<String>,
        function: impl Into<String>,
    ) -> Self {
        Self {
            package: package.into(),
            module: module.into(),
            function: function.into(),
        }
    }
}

impl fmt::Display for MoveTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}::{}", self.package, self.module, self.function)
    }
}

impl FromStr for MoveTarget {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split("::").collect();
        match parts.as_slice() {
            [package, module, function]
                if !package.is_empty() && !module.is_empty() && !function.is_empty() =>
            {
                Ok(Self::new(*package, *module, *function))
            }
            _ => Err(LedgerError::Encoding(format!("malformed move target: {s}"))),
        }
    }
}

impl TryFrom<String> for MoveTarget {
    type Error = LedgerError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<MoveTarget> for String {
    fn from(t: MoveTarget) -> Self {
        t.to_string()
    }
}

/// A transaction input.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum CallArg {
    /// A plain value, serialized by the ledger client for the target function.
    Pure { value: serde_json::Value },
    /// A reference to an on-chain object.
    Object {
        #[serde(rename = "objectId")]
        object_id: ObjectId,
    },
}

/// A reference used as a command argument.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Argument {
    /// The coin paying for gas.
    GasCoin,
    Input {
        index: usize,
    },
    Result {
        index: usize,
    },
    NestedResult {
        index: usize,
        #[serde(rename = "resultIndex")]
        result_index: usize,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveCall {
    pub target: MoveTarget,
    #[serde(default)]
    pub type_arguments: Vec<String>,
    pub arguments: Vec<Argument>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Command {
    MoveCall(MoveCall),
    /// Carve new coins of the given amounts out of `coin`.
    SplitCoins {
        coin: Argument,
        amounts: Vec<Argument>,
    },
}

/// A programmable transaction under construction.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionBlock {
    pub inputs: Vec<CallArg>,
    pub commands: Vec<Command>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_budget: Option<u64>,
}

impl TransactionBlock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pure input.
    pub fn pure<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<Argument, LedgerError> {
        let value =
            serde_json::to_value(value).map_err(|e| LedgerError::Encoding(e.to_string()))?;
        Ok(self.push_input(CallArg::Pure { value }))
    }

    /// Add an object input.
    pub fn object(&mut self, object_id: &ObjectId) -> Argument {
        self.push_input(CallArg::Object {
            object_id: object_id.clone(),
        })
    }

    /// The gas coin.
    pub fn gas(&self) -> Argument {
        Argument::GasCoin
    }

    /// Split `amounts` off `coin`; returns one argument per new coin.
    pub fn split_coins(&mut self, coin: Argument, amounts: Vec<Argument>) -> Vec<Argument> {
        let count = amounts.len();
        let index = self.push_command(Command::SplitCoins { coin, amounts });
        (0..count)
            .map(|result_index| Argument::NestedResult {
                index,
                result_index,
            })
            .collect()
    }

    /// Call a Move function; returns a reference to its result.
    pub fn move_call(&mut self, target: MoveTarget, arguments: Vec<Argument>) -> Argument {
        let index = self.push_command(Command::MoveCall(MoveCall {
            target,
            type_arguments: Vec::new(),
            arguments,
        }));
        Argument::Result { index }
    }

    pub fn set_gas_budget(&mut self, budget: u64) {
        self.gas_budget = Some(budget);
    }

    /// Move calls in command order.
    pub fn move_calls(&self) -> impl Iterator<Item = &MoveCall> {
        self.commands.iter().filter_map(|c| match c {
            Command::MoveCall(call) => Some(call),
            Command::SplitCoins { .. } => None,
        })
    }

    /// Resolve an input argument to the input it refers to.
    pub fn input(&self, argument: Argument) -> Option<&CallArg> {
        match argument {
            Argument::Input { index } => self.inputs.get(index),
            _ => None,
        }
    }

    fn push_input(&mut self, arg: CallArg) -> Argument {
        self.inputs.push(arg);
        Argument::Input {
            index: self.inputs.len() - 1,
        }
    }

    fn push_command(&mut self, command: Command) -> usize {
        self.commands.push(command);
        self.commands.len() - 1
    }
}
