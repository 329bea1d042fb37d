use crate::protocol::create::CreateCmd;
use crate::protocol::delete::DeleteCmd;
use crate::protocol::get::GetCmd;
use crate::protocol::reply::{ItemView, Reply};
use crate::protocol::update::UpdateCmd;
use crate::store::{Error, ItemStore};

/// Shopping list commands
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// GET /shoppingListItems
    List,
    /// DELETE /shoppingListItems
    Clear,
    /// POST /shoppingListItem
    Create(CreateCmd),
    /// GET /shoppingListItem/{id}
    Get(GetCmd),
    /// PUT /shoppingListItem/{id}
    Update(UpdateCmd),
    /// DELETE /shoppingListItem/{id}
    Delete(DeleteCmd),
}

impl Command {
    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Command::List => "list",
            Command::Clear => "clear",
            Command::Create(_) => "create",
            Command::Get(_) => "get",
            Command::Update(_) => "update",
            Command::Delete(_) => "delete",
        }
    }

    /// Execute the command on the given store and return the reply
    pub fn execute(&self, store: &ItemStore) -> Result<Reply, Error> {
        match self {
            Command::List => {
                let items = store
                    .list_all()?
                    .into_iter()
                    .map(|(id, item)| ItemView::new(id, item))
                    .collect();
                Ok(Reply::Items(items))
            }
            Command::Clear => {
                store.clear_all()?;
                Ok(Reply::Empty)
            }
            Command::Create(cmd) => cmd.execute(store),
            Command::Get(cmd) => cmd.execute(store),
            Command::Update(cmd) => cmd.execute(store),
            Command::Delete(cmd) => cmd.execute(store),
        }
    }
}
