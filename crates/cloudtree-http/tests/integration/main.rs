//! Integration tests for cloudtree-http
//!
//! Uses wiremock to simulate the remote API and verifies end-to-end
//! behavior of listings, transfers, account lookup and error mapping
//! through the `IRemoteStore` implementation.


mod test_transfer;
