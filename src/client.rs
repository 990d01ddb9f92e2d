use crate::{messages::*, Entry, Error, Message, Proposal, Slot};
use hyper::{client::HttpConnector, Body, Client, Method as HttpMethod, Request, Uri};
use serde::{de::DeserializeOwned, Serialize};
use std::net::SocketAddr;

/// Client used by proposers and learners to call a single acceptor.
///
/// Replies carrying `Cancel` or `AlreadyFilled` are returned as `Ok`; an
/// `Err` means no usable reply was received.
#[derive(Clone)]
pub struct AcceptorClient {
    client: Client<HttpConnector, Body>,
    addr: SocketAddr,
}

impl AcceptorClient {
    pub fn new(addr: SocketAddr) -> AcceptorClient {
        AcceptorClient { client: Client::new(), addr }
    }

    pub async fn prepare(&self, proposal: Proposal) -> Result<PrepareReply, Error> {
        self.call(Method::Prepare, &PrepareArgs { proposal }).await
    }

    pub async fn accept(
        &self,
        proposal: Proposal,
        index: Slot,
        proposal_message: Message,
    ) -> Result<AcceptReply, Error> {
        self.call(Method::Accept, &AcceptArgs { proposal, index, proposal_message }).await
    }

    pub async fn commit(&self, index: Slot, message: Message) -> Result<(), Error> {
        let _: CommitReply = self.call(Method::Commit, &CommitArgs { index, message }).await?;
        Ok(())
    }

    pub async fn get_messages(&self) -> Result<Vec<Entry>, Error> {
        let reply: GetMessagesReply = self.call(Method::GetMessages, &GetMessagesArgs).await?;
        Ok(reply.messages)
    }

    async fn call<A, R>(&self, method: Method, args: &A) -> Result<R, Error>
    where
        A: Serialize,
        R: DeserializeOwned,
    {
        let uri: Uri = format!("http://{}/{}", self.addr, method.name()).parse()?;
        let mut request = Request::new(Body::from(bincode::serialize(args)?));
        *request.method_mut() = HttpMethod::POST;
        *request.uri_mut() = uri;

        trace!("Calling {} on {}", method, self.addr);
        let response = self.client.request(request).await?;
        if !response.status().is_success() {
            return Err(Error::Status(response.status()));
        }

        let body = hyper::body::to_bytes(response.into_body()).await?;
        Ok(bincode::deserialize(&body)?)
    }
}
