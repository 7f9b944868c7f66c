//! Definitions of Solidity functions called during deployment

use alloy::sol;

sol! {
    interface IReaperVault {
        function initialize(address _strategy) external returns (bool);
        function strategy() external view returns (address);
    }

    interface IReaperStrategy {
        function initialize(
            address _vault,
            address[] memory _feeRemitters,
            address[] memory _strategists,
            address _want,
            uint256 _poolId
        ) external;
    }
}
