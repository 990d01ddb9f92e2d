use crate::{messages::*, Acceptor, Configuration, Error};
use bytes::Bytes;
use hyper::{
    service::{make_service_fn, service_fn},
    Body, Method as HttpMethod, Request, Response, Server, StatusCode,
};
use serde::{de::DeserializeOwned, Serialize};
use std::{future::Future, net::SocketAddr};

/// HTTP front for an acceptor. Each call is a `POST /<Method>` with a
/// bincode request body, answered with a bincode reply.
#[derive(Clone)]
pub struct Handler {
    acceptor: Acceptor,
}

impl Handler {
    pub fn new(acceptor: Acceptor) -> Handler {
        Handler { acceptor }
    }

    pub async fn handle(&self, req: Request<Body>) -> Result<Response<Body>, hyper::Error> {
        let method = match Method::from_name(req.uri().path().trim_start_matches('/')) {
            Some(method) => method,
            None => return respond(StatusCode::NOT_FOUND),
        };
        if *req.method() != HttpMethod::POST {
            return respond(StatusCode::METHOD_NOT_ALLOWED);
        }

        let body = hyper::body::to_bytes(req.into_body()).await?;
        match method {
            Method::Prepare => match decode::<PrepareArgs>(method, &body) {
                Some(args) => reply(&self.acceptor.prepare(args).await),
                None => respond(StatusCode::BAD_REQUEST),
            },
            Method::Accept => match decode::<AcceptArgs>(method, &body) {
                Some(args) => reply(&self.acceptor.accept(args).await),
                None => respond(StatusCode::BAD_REQUEST),
            },
            Method::Commit => match decode::<CommitArgs>(method, &body) {
                Some(args) => match self.acceptor.commit(args).await {
                    Ok(res) => reply(&res),
                    Err(_) => respond(StatusCode::BAD_REQUEST),
                },
                None => respond(StatusCode::BAD_REQUEST),
            },
            Method::GetMessages => match decode::<GetMessagesArgs>(method, &body) {
                Some(args) => reply(&self.acceptor.get_messages(args).await),
                None => respond(StatusCode::BAD_REQUEST),
            },
        }
    }
}

/// Binds the configured address and returns the bound address along with
/// the future that serves requests until it fails.
pub fn bind(
    config: &Configuration,
    acceptor: Acceptor,
) -> Result<(SocketAddr, impl Future<Output = Result<(), Error>>), Error> {
    let handler = Handler::new(acceptor);
    let service = make_service_fn(move |_| {
        let handler = handler.clone();
        async move {
            Ok::<_, hyper::Error>(service_fn(move |req| {
                let handler = handler.clone();
                async move { handler.handle(req).await }
            }))
        }
    });

    let server = Server::try_bind(&config.address()).map_err(Error::Bind)?.serve(service);
    let addr = server.local_addr();
    info!("Acceptor rpc listening on {}", addr);
    Ok((addr, async move { server.await.map_err(Error::Serve) }))
}

/// Serves the acceptor on the configured address.
pub async fn serve(config: &Configuration, acceptor: Acceptor) -> Result<(), Error> {
    let (_, server) = bind(config, acceptor)?;
    server.await
}

fn decode<T: DeserializeOwned>(method: Method, body: &Bytes) -> Option<T> {
    bincode::deserialize(body)
        .map_err(|e| warn!("Error deserializing {} request: {:?}", method, e))
        .ok()
}

fn reply<T: Serialize>(value: &T) -> Result<Response<Body>, hyper::Error> {
    match bincode::serialize(value) {
        Ok(bytes) => Ok(Response::new(Body::from(bytes))),
        Err(e) => {
            error!("Error serializing reply: {:?}", e);
            respond(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

fn respond(code: StatusCode) -> Result<Response<Body>, hyper::Error> {
    let mut resp = Response::default();
    *resp.status_mut() = code;
    Ok(resp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AcceptorClient, Entry, Message, Proposal};
    use assert_matches::assert_matches;
    use hyper::Client;
    use std::net::Ipv4Addr;

    async fn start() -> (SocketAddr, AcceptorClient) {
        let config = Configuration::new(0).with_host(Ipv4Addr::LOCALHOST.into());
        let (addr, server) = bind(&config, Acceptor::new(&config)).unwrap();
        tokio::spawn(server);
        (addr, AcceptorClient::new(addr))
    }

    #[tokio::test]
    async fn round_trip() {
        let (_, client) = start().await;

        let res = client.prepare(Proposal::new(1, 1)).await.unwrap();
        assert_matches!(res.status, PrepareStatus::Ok);
        assert_eq!(res.index, 0);

        let res = client.accept(Proposal::new(1, 1), 0, "X".into()).await.unwrap();
        assert_matches!(res.status, AcceptStatus::Ok);

        let res = client.prepare(Proposal::new(2, 1)).await.unwrap();
        assert_matches!(res.status, PrepareStatus::PrevAccepted);
        assert_eq!(res.accepted_message, Some(Message::from("X")));

        client.commit(0, "X".into()).await.unwrap();
        client.commit(2, "Z".into()).await.unwrap();

        let res = client.accept(Proposal::new(1, 1), 0, "Y".into()).await.unwrap();
        assert_matches!(res.status, AcceptStatus::AlreadyFilled);
        assert_eq!(res.message, Some(Message::from("X")));

        let log = client.get_messages().await.unwrap();
        assert_eq!(log, vec![Entry::Filled("X".into()), Entry::Empty, Entry::Filled("Z".into())]);
    }

    #[tokio::test]
    async fn rejects_bad_requests() {
        let (addr, _) = start().await;
        let client = Client::new();

        let uri = |path: &str| format!("http://{}/{}", addr, path).parse::<hyper::Uri>().unwrap();
        let post = |path: &str, body: Vec<u8>| {
            Request::builder().method(HttpMethod::POST).uri(uri(path)).body(Body::from(body)).unwrap()
        };

        let res = client.request(post("Unknown", vec![])).await.unwrap();
        assert_eq!(StatusCode::NOT_FOUND, res.status());

        let res = client.get(uri("Prepare")).await.unwrap();
        assert_eq!(StatusCode::METHOD_NOT_ALLOWED, res.status());

        let res = client.request(post("Accept", vec![1, 2])).await.unwrap();
        assert_eq!(StatusCode::BAD_REQUEST, res.status());
    }

    #[tokio::test]
    async fn unaddressable_commit_is_rejected() {
        let (_, client) = start().await;
        client.commit(0, "a".into()).await.unwrap();

        for &index in &[u64::MAX, 1 << 62] {
            let err = client.commit(index, "x".into()).await.unwrap_err();
            assert_matches!(err, Error::Status(code) if code == StatusCode::BAD_REQUEST);
            assert!(!err.is_unreachable());
        }

        // the acceptor is still up and its log untouched
        assert_eq!(client.get_messages().await.unwrap(), vec![Entry::Filled("a".into())]);
        let res = client.prepare(Proposal::new(0, 0)).await.unwrap();
        assert_eq!(res.index, 1);
    }

    #[tokio::test]
    async fn unreachable_acceptor() {
        // bind then drop a listener so the port is closed
        let addr = std::net::TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
        let client = AcceptorClient::new(addr);

        let err = client.prepare(Proposal::new(0, 0)).await.unwrap_err();
        assert!(err.is_unreachable());
    }
}
